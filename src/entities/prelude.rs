pub use super::reservations::Entity as Reservations;
pub use super::rooms::Entity as Rooms;
pub use super::users::Entity as Users;
