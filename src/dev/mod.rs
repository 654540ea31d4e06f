/// Development utilities module
///
/// This module contains the mock data provider used by `--mock` and by the tests.
pub mod mock_client;
