pub use grocery_core::item as grocery_item;
