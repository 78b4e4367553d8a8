//! Core domain types
//!
//! Tickets, their comment threads, the enums that classify them, and the
//! clock used to timestamp every write.

mod builders;
mod clock;
mod comment;
mod ticket;

pub use builders::{CommentBuilder, TicketBuilder};
pub use clock::{Clock, FixedClock, SystemClock};
pub use comment::{Comment, CommentId, SYSTEM_AUTHOR_NAME};
pub use ticket::{Category, Priority, Status, Ticket, TicketDetail, TicketId, UnknownVariant};
