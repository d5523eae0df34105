pub mod clock;
pub mod config;
pub mod player;
pub mod sink;
pub mod system_clock;
pub mod virtual_clock;
