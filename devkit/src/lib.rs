/*!
# EOS DevKit - fake admin tool and fixtures for tests

Makes it possible to test the client without an EOS instance:
- Fake `eos` executable replaying canned answers, exit codes and delays
- Recorded invocations (arguments and environment) for assertions
- Realistic monitoring-format and JSON fixtures
*/

pub mod fake_eos;
pub mod fixtures;
pub mod test_utils;

pub use fake_eos::{FakeEos, FakeEosBuilder, Invocation, Response};
pub use test_utils::TestHarness;
