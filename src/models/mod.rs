pub mod reservation;
pub mod room;
pub mod user;

pub use reservation::{
    NewReservation, Reservation, ReservationDetails, ReservationFilter, ReservationPatch,
};
pub use room::{NewRoom, Room, RoomFilter, RoomPatch};
pub use user::{User, UserPatch};
