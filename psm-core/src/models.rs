mod axis;
mod config;
mod curve;
mod pairing;
mod point;
mod question;
mod response;

pub use axis::{AxisError, AxisStrategy, PriceAxis};
pub use config::MeterConfig;
pub use curve::{Curve, CurveError, CurveSet};
pub use pairing::Pairing;
pub use point::{PriceMetric, PricePoint, PricePoints};
pub use question::{Direction, Question};
pub use response::{ResponseSet, ResponseSetDto, ResponseSetError};
