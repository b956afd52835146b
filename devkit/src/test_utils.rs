/*!
Test harness for the EOS client

Sets up in one call:
- Logging for tests
- A fake `eos` answering every read-only command from the fixtures
- Assertions on the invocations the client made
*/

use crate::fake_eos::{FakeEos, FakeEosBuilder, Invocation, Response};
use crate::fixtures;
use anyhow::Result;
use std::path::Path;

/// Fake admin tool preloaded with the fixture answers
pub struct TestHarness {
    pub eos: FakeEos,
}

impl TestHarness {
    /// Harness answering every listing command successfully
    pub fn new() -> Result<Self> {
        Self::with_routes(|builder| builder)
    }

    /// Harness whose routes can be extended or shadowed by `customize`
    ///
    /// Routes added by `customize` are matched before the fixture routes.
    pub fn with_routes(customize: impl FnOnce(FakeEosBuilder) -> FakeEosBuilder) -> Result<Self> {
        env_logger::try_init().ok();

        let eos = Self::fixture_routes(customize(FakeEos::builder())).build()?;
        log::info!("Fake eos ready at {}", eos.path().display());
        Ok(Self { eos })
    }

    /// Fixture answers for every command the client issues
    pub fn fixture_routes(builder: FakeEosBuilder) -> FakeEosBuilder {
        builder
            .route("node ls -m", Response::stdout(fixtures::NODE_LS_M))
            .route("space ls -m", Response::stdout(fixtures::SPACE_LS_M))
            .route("group ls -m", Response::stdout(fixtures::GROUP_LS_M))
            .route("fs ls -m", Response::stdout(fixtures::FS_LS_M))
            .route("ns stat -a -m", Response::stdout(fixtures::NS_STAT_A_M))
            .route("--json node ls", Response::stdout(fixtures::node_ls_json().to_string()))
            .route("version", Response::stdout(fixtures::VERSION))
    }

    pub fn binary(&self) -> &Path {
        self.eos.path()
    }

    pub fn invocations(&self) -> Result<Vec<Invocation>> {
        self.eos.invocations()
    }

    /// Fail unless exactly `expected` argument lists were seen, in order
    pub fn assert_invocations(&self, expected: &[&str]) -> Result<()> {
        let seen: Vec<String> = self.invocations()?.into_iter().map(|call| call.args).collect();
        if seen != expected {
            anyhow::bail!("Expected invocations {:?}, got {:?}", expected, seen);
        }
        log::info!("{} invocations as expected", seen.len());
        Ok(())
    }

    /// Fail unless every invocation saw only `EOS_MGM_URL=<mgm_url>`
    pub fn assert_clean_environment(&self, mgm_url: &str) -> Result<()> {
        for call in self.invocations()? {
            if call.mgm_url.as_deref() != Some(mgm_url) {
                anyhow::bail!("'{}' ran with EOS_MGM_URL={:?}", call.args, call.mgm_url);
            }
            if let Some(home) = call.home {
                anyhow::bail!("'{}' inherited HOME={}", call.args, home);
            }
        }
        Ok(())
    }
}
