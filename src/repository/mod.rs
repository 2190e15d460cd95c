//! Typed views over the key-value store. Each repository owns one or two
//! keys and (de)serializes whole JSON documents on every access.

mod cart;
mod orders;
mod profiles;
mod session;
mod users;

pub use cart::CartRepository;
pub use orders::OrderRepository;
pub use profiles::ProfileRepository;
pub use session::SessionRepository;
pub use users::UserRepository;

pub const CART_KEY: &str = "micado_cart";
pub const COUPON_KEY: &str = "micado_coupon";
pub const USERS_KEY: &str = "micado_users";
pub const CURRENT_USER_KEY: &str = "micado_current_user";
pub const PROFILES_KEY: &str = "micado_profiles";
pub const ORDERS_KEY: &str = "micado_orders";
