pub mod history;

pub use history::{
    ActiveModel as HistoryActiveModel, Column as HistoryColumn, Entity as HistoryEntity,
    Model as HistoryModel,
};
