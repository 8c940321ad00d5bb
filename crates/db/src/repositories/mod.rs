pub mod grocery_item_repo;

pub use grocery_item_repo::GroceryItemRepo;
