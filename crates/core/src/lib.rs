pub mod allocation;
pub mod config;
pub mod config_loader;
pub mod error;
pub mod market;

pub use allocation::{AllocationDecision, PositionIntent, TargetPosition};
pub use config::{
    Comparator, EvaluatorConfig, QuantityConfig, RuleConfig, SizingConfig, TargetConfig,
};
pub use config_loader::ConfigLoader;
pub use error::EvalError;
pub use market::{
    Bar, BarField, CalendarEvent, EventKind, Instrument, MarketSnapshot, NewsItem,
};
