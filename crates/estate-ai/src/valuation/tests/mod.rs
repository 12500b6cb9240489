mod common;
mod location;
