pub mod layout;
pub mod sections;
pub mod slug;
pub mod traverse;

pub use layout::{LAYER_GAP, NODE_GAP, NODE_HEIGHT, NODE_WIDTH, layout};
pub use sections::{add_section, delete_section, reorder_sections};
pub use slug::generate_id;
pub use traverse::{children_of, descendant_ids};
