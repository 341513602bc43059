pub mod member_reader;

pub use member_reader::{MemberReader, MemberRows};
