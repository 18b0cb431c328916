use std::{
    fs,
    path::{Path, PathBuf},
    process::{Command, Output},
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
    thread,
};

use anyhow::{Context, Ok, Result, anyhow};
use insta_cmd::get_cargo_bin;
use serde_json::{Value, json};
use tempfile::TempDir;
use tiny_http::{Header, Response, Server};

mod init;
mod sync;

const BIN_NAME: &str = "glot-sync";

pub struct CliTest {
    _temp_dir: TempDir,
    project_dir: PathBuf,
}

impl CliTest {
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let project_dir = temp_dir.path().canonicalize()?;
        // Stops the config search from leaving the project
        fs::create_dir(project_dir.join(".git"))?;
        Ok(Self {
            _temp_dir: temp_dir,
            project_dir,
        })
    }

    pub fn write_file(&self, path: &str, content: &str) -> Result<()> {
        let file_path = self.project_dir.join(path);

        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory:{}", parent.display()))?;
        }

        fs::write(&file_path, content)
            .with_context(|| format!("Failed to write file: {}", file_path.display()))?;

        Ok(())
    }

    pub fn write_json(&self, path: &str, value: &Value) -> Result<()> {
        self.write_file(path, &serde_json::to_string_pretty(value)?)
    }

    pub fn root(&self) -> &Path {
        &self.project_dir
    }

    pub fn command(&self) -> Command {
        let mut cmd = Command::new(get_cargo_bin(BIN_NAME));
        cmd.current_dir(&self.project_dir);
        cmd.env_clear();
        cmd.env("NO_COLOR", "1"); // Disable colors for consistent test output
        cmd
    }

    pub fn check_command(&self) -> Command {
        let mut cmd = self.command();
        cmd.arg("check");
        cmd
    }

    pub fn sync_command(&self) -> Command {
        let mut cmd = self.command();
        cmd.arg("sync");
        cmd
    }

    pub fn read_file(&self, path: &str) -> Result<String> {
        let file_path = self.project_dir.join(path);
        fs::read_to_string(&file_path)
            .with_context(|| format!("Failed to read file: {}", file_path.display()))
    }

    pub fn read_json(&self, path: &str) -> Result<Value> {
        let content = self.read_file(path)?;
        serde_json::from_str(&content).with_context(|| format!("Invalid JSON in {}", path))
    }

    /// Config pointing the translator at `provider` with no real waiting.
    pub fn use_provider(&self, provider: &MockProvider) -> Result<()> {
        self.write_json(
            ".glotsyncrc.json",
            &json!({
                "translation": {
                    "endpoint": provider.endpoint(),
                    "baseDelayMs": 1,
                    "maxDelayMs": 5,
                    "maxJitterMs": 0,
                    "requestDelayMs": 0,
                    "timeoutSecs": 10
                }
            }),
        )
    }
}

pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

/// Local HTTP server standing in for the translation provider.
///
/// Every request gets the same status and body.
pub struct MockProvider {
    server: Arc<Server>,
    endpoint: String,
    requests: Arc<AtomicUsize>,
}

impl MockProvider {
    pub fn start(status: u16, body: String) -> Result<Self> {
        let server = Server::http("127.0.0.1:0").map_err(|err| anyhow!("{}", err))?;
        let addr = server
            .server_addr()
            .to_ip()
            .context("mock provider is not listening on an IP address")?;
        let content_type = Header::from_bytes(&b"Content-Type"[..], &b"application/json"[..])
            .map_err(|()| anyhow!("invalid header"))?;

        let server = Arc::new(server);
        let requests = Arc::new(AtomicUsize::new(0));
        let handler = Arc::clone(&server);
        let counter = Arc::clone(&requests);
        thread::spawn(move || {
            for request in handler.incoming_requests() {
                counter.fetch_add(1, Ordering::SeqCst);
                let response = Response::from_string(body.as_str())
                    .with_status_code(status)
                    .with_header(content_type.clone());
                let _ = request.respond(response);
            }
        });

        Ok(Self {
            server,
            endpoint: format!("http://{}", addr),
            requests,
        })
    }

    /// Replies with a successful `generateContent` response carrying `text`.
    pub fn translating_to(text: &str) -> Result<Self> {
        let body = json!({
            "candidates": [{"content": {"parts": [{"text": text}], "role": "model"}}]
        });
        Self::start(200, body.to_string())
    }

    pub fn rate_limited() -> Result<Self> {
        let body = json!({"error": {"code": 429, "status": "RESOURCE_EXHAUSTED"}});
        Self::start(429, body.to_string())
    }

    pub fn failing() -> Result<Self> {
        let body = json!({"error": {"code": 500, "status": "INTERNAL"}});
        Self::start(500, body.to_string())
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn requests(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }
}

impl Drop for MockProvider {
    fn drop(&mut self) {
        self.server.unblock();
    }
}
