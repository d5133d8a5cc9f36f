//! Handler integration tests - push events in, messages out.

mod scenarios;
mod resolvers;
mod isolation;
