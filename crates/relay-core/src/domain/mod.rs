//! 주문 도메인 타입.

mod exchange;
mod order;
mod ticker;

pub use exchange::SpotExchange;
pub use order::{OrderRequest, OrderResult, OrderSide};
pub use ticker::TickerSnapshot;
