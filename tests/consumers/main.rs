//! Pull-consumer integration tests - pop, wait_for_message and signals.

mod select;
