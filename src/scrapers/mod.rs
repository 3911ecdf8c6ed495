pub mod fields;
pub mod markup;
pub mod over25tips;
pub mod pipeline;
pub mod rows;
pub mod table;
pub mod translate;
