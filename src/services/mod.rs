pub mod credentials;
pub mod pricing;
pub mod seed;

pub use seed::SeedReport;

pub mod auth_service;
pub mod auth_service_impl;
pub use auth_service::{AuthError, AuthService, LoginRequest, RegisterRequest};
pub use auth_service_impl::SeaOrmAuthService;

pub mod user_service;
pub mod user_service_impl;
pub use user_service::{CreateUserRequest, UserError, UserService};
pub use user_service_impl::SeaOrmUserService;

pub mod room_service;
pub mod room_service_impl;
pub use room_service::{CreateRoomRequest, RoomError, RoomService};
pub use room_service_impl::SeaOrmRoomService;

pub mod reservation_service;
pub mod reservation_service_impl;
pub use reservation_service::{BookingRequest, ReservationError, ReservationService};
pub use reservation_service_impl::SeaOrmReservationService;

pub mod system_service;
pub mod system_service_impl;
pub use system_service::{DashboardStats, ReservationCounts, SystemError, SystemService};
pub use system_service_impl::SeaOrmSystemService;
