//! Repository implementations backed by DynamoDB.

pub mod todo;

pub use todo::DynamoTodoRepository;
