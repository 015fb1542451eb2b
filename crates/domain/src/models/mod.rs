//! Domain models for the circle bridge.

pub mod circle;
pub mod cot;
pub mod position;

pub use circle::{Circle, CircleSummary, CirclesResponse, Member, MemberLocation};
pub use cot::CotEvent;
pub use position::PositionReport;
