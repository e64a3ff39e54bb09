pub mod enrichment;
pub mod score;
pub mod snapshot;
pub mod trader;

pub use enrichment::{PriceInfo, RankedToken, TokenMetadata};
pub use score::{TokenScore, WindowMetrics};
pub use snapshot::Snapshot;
pub use trader::Trader;
