//! Game entities

mod asteroid;
mod spaceship;

pub use asteroid::Asteroid;
pub use spaceship::Spaceship;
