pub mod wisp;
