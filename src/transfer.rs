//! Upload of a local file to an FTP server.
//!
//! [`TransferPlan::from_args`] performs every local check (file exists, both
//! credentials present) before [`upload`] dials anything. The FTP client sits
//! behind [`FtpConnector`]/[`FtpSession`] so the control flow can be tested
//! without a server.

use std::{
    fmt,
    fs::File,
    io::{BufReader, Read},
    ops::{Deref, DerefMut},
    path::{Path, PathBuf},
};

use anyhow::Context;
use log::{debug, warn};

use crate::{
    cli::TransferArgs,
    config::AppConfig,
    error::{ChartError, Result},
    io_utils,
    ui::Ui,
};

pub trait FtpSession {
    fn login(&mut self, user: &str, password: &str) -> anyhow::Result<()>;
    fn store(&mut self, remote_name: &str, reader: &mut dyn Read) -> anyhow::Result<u64>;
    fn quit(&mut self) -> anyhow::Result<()>;
}

pub trait FtpConnector {
    type Session: FtpSession;

    fn connect(&self, server: &str) -> anyhow::Result<Self::Session>;
}

pub struct SuppaFtpConnector;

impl FtpConnector for SuppaFtpConnector {
    type Session = suppaftp::FtpStream;

    fn connect(&self, server: &str) -> anyhow::Result<Self::Session> {
        suppaftp::FtpStream::connect(server).with_context(|| format!("Dialing {server}"))
    }
}

impl FtpSession for suppaftp::FtpStream {
    fn login(&mut self, user: &str, password: &str) -> anyhow::Result<()> {
        suppaftp::FtpStream::login(self, user, password)?;
        Ok(())
    }

    fn store(&mut self, remote_name: &str, mut reader: &mut dyn Read) -> anyhow::Result<u64> {
        let written = self.put_file(remote_name, &mut reader)?;
        Ok(written)
    }

    fn quit(&mut self) -> anyhow::Result<()> {
        suppaftp::FtpStream::quit(self)?;
        Ok(())
    }
}

/// Everything needed to perform one upload, validated locally.
#[derive(Clone, PartialEq, Eq)]
pub struct TransferPlan {
    pub local: PathBuf,
    pub server: String,
    pub user: String,
    pub password: String,
    pub remote_name: String,
}

impl fmt::Debug for TransferPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransferPlan")
            .field("local", &self.local)
            .field("server", &self.server)
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .field("remote_name", &self.remote_name)
            .finish()
    }
}

impl TransferPlan {
    pub fn from_args(file: &Path, args: &TransferArgs, config: &AppConfig) -> Result<Self> {
        let local = io_utils::verify_source_file(file)?;

        let user = non_empty(args.user.as_deref());
        let password = non_empty(args.password.as_deref());
        let (Some(user), Some(password)) = (user, password) else {
            return Err(ChartError::Config(
                "Both credentials are needed to authenticate with the ftp server.".into(),
            ));
        };

        let remote_name = match non_empty(args.filename.as_deref()) {
            Some(name) => name.to_string(),
            None => local
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .ok_or_else(|| {
                    ChartError::Config(format!(
                        "Cannot derive a remote file name from {}",
                        local.display()
                    ))
                })?,
        };

        let server = non_empty(args.server.as_deref())
            .unwrap_or(config.default_server.as_str())
            .to_string();

        Ok(Self {
            local,
            server,
            user: user.to_string(),
            password: password.to_string(),
            remote_name,
        })
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

pub fn execute(file: &Path, args: &TransferArgs, config: &AppConfig, ui: &dyn Ui) -> Result<u64> {
    let plan = TransferPlan::from_args(file, args, config)?;
    debug!("Transfer plan: {plan:?}");
    ui.info("Attempting to transfer file...");
    let bytes = upload(&SuppaFtpConnector, &plan)?;
    ui.info("Transfer complete.");
    Ok(bytes)
}

/// Quits the control connection when dropped, whichever way the upload ends.
struct SessionGuard<'a, S: FtpSession> {
    session: S,
    server: &'a str,
}

impl<S: FtpSession> Deref for SessionGuard<'_, S> {
    type Target = S;

    fn deref(&self) -> &S {
        &self.session
    }
}

impl<S: FtpSession> DerefMut for SessionGuard<'_, S> {
    fn deref_mut(&mut self) -> &mut S {
        &mut self.session
    }
}

impl<S: FtpSession> Drop for SessionGuard<'_, S> {
    fn drop(&mut self) {
        if let Err(err) = self.session.quit() {
            warn!("QUIT to {} failed: {err:#}", self.server);
        }
    }
}

pub fn upload<C: FtpConnector>(connector: &C, plan: &TransferPlan) -> Result<u64> {
    let session = connector
        .connect(&plan.server)
        .map_err(|err| ChartError::Connection {
            server: plan.server.clone(),
            reason: format!("{err:#}"),
        })?;
    let mut session = SessionGuard {
        session,
        server: &plan.server,
    };

    session
        .login(&plan.user, &plan.password)
        .map_err(|err| ChartError::Auth {
            server: plan.server.clone(),
            reason: format!("{err:#}"),
        })?;

    let file = File::open(&plan.local).map_err(|err| {
        ChartError::file_system(
            &plan.local,
            format!("Could not open the file '{}': {err}", plan.local.display()),
        )
    })?;
    let mut reader = BufReader::new(file);

    let written = session
        .store(&plan.remote_name, &mut reader)
        .map_err(|err| ChartError::Transfer {
            server: plan.server.clone(),
            reason: format!("{err:#}"),
        })?;
    debug!(
        "Stored {written} byte(s) as '{}' on {}",
        plan.remote_name, plan.server
    );
    Ok(written)
}
