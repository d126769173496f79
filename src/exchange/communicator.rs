use crate::error::*;
use crate::exchange::*;

/// Point to point messaging between a fixed set of ranks `0..size`.
///
/// Messages from one source to one destination arrive in the order they
/// were sent. Every failure is a [`HeatError::Communication`].
pub trait Communicator: Send {
    fn rank(&self) -> usize;

    fn size(&self) -> usize;

    fn send(&self, dest: usize, message: Message) -> Result<()>;

    /// Block until the next message from `source` arrives.
    fn recv(&self, source: usize) -> Result<Message>;

    fn comm_error(&self, peer: usize, failure: CommFailure) -> HeatError {
        HeatError::communication(self.rank(), peer, failure)
    }

    /// Receive from `source` and check that it is the message expected for
    /// `step`. A mismatch means the ranks fell out of lockstep.
    fn recv_expected(
        &self,
        source: usize,
        tag: Tag,
        step: usize,
        len: Option<usize>,
    ) -> Result<Message> {
        let message = self.recv(source)?;
        if message.tag != tag {
            return Err(self.comm_error(
                source,
                CommFailure::UnexpectedTag {
                    expected: tag,
                    found: message.tag,
                },
            ));
        }
        if message.step != step {
            return Err(self.comm_error(
                source,
                CommFailure::StepMismatch {
                    expected: step,
                    found: message.step,
                },
            ));
        }
        if let Some(expected) = len {
            if message.payload.len() != expected {
                return Err(self.comm_error(
                    source,
                    CommFailure::LengthMismatch {
                        expected,
                        found: message.payload.len(),
                    },
                ));
            }
        }
        Ok(message)
    }

    /// No rank leaves until every rank has arrived. Rank 0 collects one
    /// message from each rank, then releases them all.
    fn barrier(&self, step: usize) -> Result<()> {
        if self.size() == 1 {
            return Ok(());
        }
        if self.rank() == 0 {
            for source in 1..self.size() {
                self.recv_expected(source, Tag::Barrier, step, Some(0))?;
            }
            for dest in 1..self.size() {
                self.send(dest, Message::empty(Tag::Barrier, step))?;
            }
        } else {
            self.send(0, Message::empty(Tag::Barrier, step))?;
            self.recv_expected(0, Tag::Barrier, step, Some(0))?;
        }
        Ok(())
    }
}
