mod modal_overlay;
pub use modal_overlay::ModalOverlay;

mod admin_layout;
pub use admin_layout::{AdminLayoutView, NavItem};

mod users;
pub use users::UsersView;

mod permissions;
pub use permissions::PermissionsView;
