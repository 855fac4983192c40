pub mod inflect;
pub mod text;
