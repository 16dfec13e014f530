pub mod ids;
pub mod time;

pub use ids::{PushIdGenerator, PUSH_ID_LEN};
pub use self::time::now_millis;
