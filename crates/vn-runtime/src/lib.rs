mod engine;
pub mod measure;
pub mod paginate;
pub mod player;
pub mod typewriter;

pub use engine::{
    ChapterHistoryPolicy, VnEngine, VnEngineOptions, MIN_PAGINATION_HEIGHT, SNAPSHOT_SCHEMA_V1,
};
pub use measure::{GridMeasure, TextMeasure, GRID_LINE_HEIGHT};
pub use paginate::{paginate, paginate_with, SAFETY_MARGIN};
pub use player::{Player, PlayerAction};
pub use typewriter::{Typewriter, TYPING_SPEED_MS};
