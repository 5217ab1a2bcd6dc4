pub mod pool;
pub mod record;
