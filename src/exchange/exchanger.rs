use crate::domain::LocalField;
use crate::error::*;
use crate::exchange::*;

/// Neighbor link used during one exchange phase.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum Link {
    Above(usize),
    Below(usize),
}

/// Refreshes a band's ghost rows from its vertical neighbors.
///
/// Each neighboring pair trades exactly two rows per step. To stay
/// deadlock free with blocking sends the pairs are worked in two phases:
/// first `(0, 1), (2, 3), ...`, then `(1, 2), (3, 4), ...`. Within a pair
/// the even rank sends first and the odd rank receives first.
#[derive(Debug, Copy, Clone)]
pub struct BoundaryExchanger {
    rank: usize,
    size: usize,
    ny: usize,
}

impl BoundaryExchanger {
    pub fn new(rank: usize, size: usize, ny: usize) -> Self {
        BoundaryExchanger { rank, size, ny }
    }

    fn above(&self) -> Option<Link> {
        self.rank.checked_sub(1).map(Link::Above)
    }

    fn below(&self) -> Option<Link> {
        (self.rank + 1 < self.size).then_some(Link::Below(self.rank + 1))
    }

    fn is_even(&self) -> bool {
        self.rank % 2 == 0
    }

    /// Links in the order this rank has to work them.
    fn schedule(&self) -> [Option<Link>; 2] {
        if self.is_even() {
            [self.below(), self.above()]
        } else {
            [self.above(), self.below()]
        }
    }

    /// Blocking. Returns once every ghost row this band has a neighbor for
    /// holds that neighbor's boundary row from `current`. A single band
    /// has nothing to do.
    pub fn exchange<C: Communicator>(
        &self,
        comm: &C,
        field: &mut LocalField,
        step: usize,
    ) -> Result<()> {
        profiling::scope!("exchange: ghost rows");
        debug_assert_eq!(comm.rank(), self.rank);
        debug_assert_eq!(comm.size(), self.size);
        for link in self.schedule().into_iter().flatten() {
            if self.is_even() {
                self.send(comm, field, link, step)?;
                self.receive(comm, field, link, step)?;
            } else {
                self.receive(comm, field, link, step)?;
                self.send(comm, field, link, step)?;
            }
        }
        Ok(())
    }

    fn send<C: Communicator>(
        &self,
        comm: &C,
        field: &LocalField,
        link: Link,
        step: usize,
    ) -> Result<()> {
        match link {
            Link::Above(peer) => comm.send(
                peer,
                Message::row(Direction::Upward, step, field.first_owned_row()),
            ),
            Link::Below(peer) => comm.send(
                peer,
                Message::row(Direction::Downward, step, field.last_owned_row()),
            ),
        }
    }

    fn receive<C: Communicator>(
        &self,
        comm: &C,
        field: &mut LocalField,
        link: Link,
        step: usize,
    ) -> Result<()> {
        match link {
            Link::Above(peer) => {
                // The band above sends its last row downward.
                let message = comm.recv_expected(
                    peer,
                    Tag::Row(Direction::Downward),
                    step,
                    Some(self.ny),
                )?;
                field.top_ghost_mut().copy_from_slice(&message.payload);
            }
            Link::Below(peer) => {
                let message = comm.recv_expected(
                    peer,
                    Tag::Row(Direction::Upward),
                    step,
                    Some(self.ny),
                )?;
                field.bottom_ghost_mut().copy_from_slice(&message.payload);
            }
        }
        Ok(())
    }
}
