mod identifier;
mod login;

pub use identifier::Identifier;
pub use login::LoginUserRequest;
