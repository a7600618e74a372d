pub mod user;

pub(crate) use user::UserRow;
