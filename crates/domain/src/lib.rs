pub mod calendar;
pub mod error;
pub mod ids;

pub use calendar::*;
pub use error::DomainError;
pub use ids::{
    CalendarId, CategoryId, EventId, IdGenerator, SequentialIdGenerator, UuidIdGenerator,
};
