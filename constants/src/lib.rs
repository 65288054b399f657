pub mod stack;
pub mod synthetic;
pub mod tensor;
