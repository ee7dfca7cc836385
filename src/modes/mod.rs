pub mod snake;
pub mod todo;

pub use snake::SnakeMode;
pub use todo::TodoMode;
