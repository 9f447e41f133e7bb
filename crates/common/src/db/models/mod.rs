//! SeaORM entity models

mod summary;

pub use summary::{
    Entity as SummaryEntity,
    Model as Summary,
    ActiveModel as SummaryActiveModel,
};
