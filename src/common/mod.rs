pub mod path_manipulation;
