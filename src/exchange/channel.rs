use crate::error::*;
use crate::exchange::*;
use crossbeam_channel::{bounded, Receiver, Sender};

/// In-process communicator, one bounded channel per ordered rank pair.
/// Dropping a communicator disconnects it from every peer, so a failed
/// worker makes its neighbors fail instead of hang.
pub struct ChannelCommunicator {
    rank: usize,
    size: usize,
    senders: Vec<Option<Sender<Message>>>,
    receivers: Vec<Option<Receiver<Message>>>,
}

impl ChannelCommunicator {
    /// Build connected communicators for ranks `0..size`.
    /// `capacity` is the number of messages a sender may run ahead of
    /// its receiver on one pair.
    pub fn world(size: usize, capacity: usize) -> Vec<Self> {
        let mut comms: Vec<ChannelCommunicator> = (0..size)
            .map(|rank| ChannelCommunicator {
                rank,
                size,
                senders: (0..size).map(|_| None).collect(),
                receivers: (0..size).map(|_| None).collect(),
            })
            .collect();

        for source in 0..size {
            for dest in 0..size {
                if source == dest {
                    continue;
                }
                let (tx, rx) = bounded(capacity);
                comms[source].senders[dest] = Some(tx);
                comms[dest].receivers[source] = Some(rx);
            }
        }
        comms
    }
}

impl Communicator for ChannelCommunicator {
    fn rank(&self) -> usize {
        self.rank
    }

    fn size(&self) -> usize {
        self.size
    }

    fn send(&self, dest: usize, message: Message) -> Result<()> {
        let sender = self
            .senders
            .get(dest)
            .and_then(|s| s.as_ref())
            .ok_or_else(|| {
                self.comm_error(dest, CommFailure::InvalidPeer(dest))
            })?;
        sender
            .send(message)
            .map_err(|_| self.comm_error(dest, CommFailure::Disconnected))
    }

    fn recv(&self, source: usize) -> Result<Message> {
        let receiver = self
            .receivers
            .get(source)
            .and_then(|r| r.as_ref())
            .ok_or_else(|| {
                self.comm_error(source, CommFailure::InvalidPeer(source))
            })?;
        receiver
            .recv()
            .map_err(|_| self.comm_error(source, CommFailure::Disconnected))
    }
}

#[cfg(test)]
mod unit_tests {
    use super::*;

    #[test]
    fn send_recv_test() {
        let mut world = ChannelCommunicator::world(3, 2);
        let c2 = world.pop().unwrap();
        let c1 = world.pop().unwrap();
        let c0 = world.pop().unwrap();
        assert_eq!(c1.rank(), 1);
        assert_eq!(c1.size(), 3);

        c0.send(2, Message::new(Tag::Probe, 0, vec![1.0])).unwrap();
        c1.send(2, Message::new(Tag::Probe, 0, vec![2.0])).unwrap();
        c0.send(2, Message::new(Tag::Probe, 1, vec![3.0])).unwrap();

        // Per source ordering, independent of other sources.
        assert_eq!(c2.recv(1).unwrap().payload, vec![2.0]);
        assert_eq!(c2.recv(0).unwrap().payload, vec![1.0]);
        assert_eq!(c2.recv(0).unwrap().step, 1);
    }

    #[test]
    fn invalid_peer_test() {
        let world = ChannelCommunicator::world(2, 1);
        let e = world[0].send(0, Message::empty(Tag::Probe, 0)).unwrap_err();
        assert!(matches!(
            e,
            HeatError::Communication {
                failure: CommFailure::InvalidPeer(0),
                ..
            }
        ));
        assert!(world[1].recv(5).is_err());
    }

    #[test]
    fn disconnect_test() {
        let mut world = ChannelCommunicator::world(2, 1);
        let c1 = world.pop().unwrap();
        drop(world);
        let e = c1.recv(0).unwrap_err();
        assert_eq!(e.rank(), Some(1));
        assert!(matches!(
            e,
            HeatError::Communication {
                peer: 0,
                failure: CommFailure::Disconnected,
                ..
            }
        ));
        assert!(c1.send(0, Message::empty(Tag::Probe, 0)).is_err());
    }

    #[test]
    fn recv_expected_test() {
        let world = ChannelCommunicator::world(2, 4);
        world[0]
            .send(1, Message::row(Direction::Downward, 3, &[1.0, 2.0]))
            .unwrap();
        world[0]
            .send(1, Message::row(Direction::Downward, 4, &[1.0]))
            .unwrap();
        world[0]
            .send(1, Message::row(Direction::Upward, 5, &[1.0, 2.0]))
            .unwrap();

        let ok = world[1]
            .recv_expected(0, Tag::Row(Direction::Downward), 3, Some(2))
            .unwrap();
        assert_eq!(ok.payload, vec![1.0, 2.0]);

        let short = world[1]
            .recv_expected(0, Tag::Row(Direction::Downward), 4, Some(2))
            .unwrap_err();
        assert!(matches!(
            short,
            HeatError::Communication {
                failure: CommFailure::LengthMismatch {
                    expected: 2,
                    found: 1
                },
                ..
            }
        ));

        let wrong = world[1]
            .recv_expected(0, Tag::Row(Direction::Downward), 5, Some(2))
            .unwrap_err();
        assert!(matches!(
            wrong,
            HeatError::Communication {
                failure: CommFailure::UnexpectedTag { .. },
                ..
            }
        ));
    }

    #[test]
    fn barrier_test() {
        let world = ChannelCommunicator::world(4, 1);
        std::thread::scope(|s| {
            for comm in world.iter() {
                s.spawn(move || {
                    for step in 0..3 {
                        comm.barrier(step).unwrap();
                    }
                });
            }
        });
    }
}
