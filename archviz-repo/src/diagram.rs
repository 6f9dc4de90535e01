//! Diagram generator adapters
//!
//! The report assembler only sees [`DiagramGenerator`]; which implementation
//! backs it is decided by [`DiagramConfig`].

use archviz_core::{
    ArchvizError, ArchvizResult, DiagramConfig, DiagramGenerator, DiagramProvider, ErrorContext,
};
use async_trait::async_trait;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::process::Command;
use tracing::{debug, info};

/// Runs an external program and reads the diagram from its stdout
///
/// The summary is passed as the final command-line argument.
#[derive(Debug, Clone)]
pub struct CommandDiagramGenerator {
    program: String,
    args: Vec<String>,
    working_dir: Option<PathBuf>,
}

impl CommandDiagramGenerator {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
            working_dir: None,
        }
    }

    pub fn with_working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }

    pub fn from_config(config: &DiagramConfig) -> Self {
        let generator = Self::new(config.program.clone(), config.args.clone());
        match &config.working_dir {
            Some(dir) => generator.with_working_dir(dir),
            None => generator,
        }
    }

    fn error(&self, message: String, operation: &str) -> ArchvizError {
        ArchvizError::Diagram {
            message,
            provider: Some(self.name().to_string()),
            context: ErrorContext::new("diagram")
                .with_operation(operation)
                .with_metadata("program", &self.program),
        }
    }
}

#[async_trait]
impl DiagramGenerator for CommandDiagramGenerator {
    fn name(&self) -> &str {
        "command"
    }

    async fn generate(&self, summary: &str) -> ArchvizResult<String> {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args).arg(summary).kill_on_drop(true);
        if let Some(dir) = &self.working_dir {
            cmd.current_dir(dir);
        }

        debug!(program = %self.program, args = ?self.args, "Running diagram generator");

        let output = cmd.output().await.map_err(|e| {
            self.error(
                format!("Failed to execute {}: {}", self.program, e),
                "spawn",
            )
        })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let message = match stderr.trim() {
                "" => format!("{} {}", self.program, output.status),
                detail => format!("{} {}: {}", self.program, output.status, detail),
            };
            return Err(self.error(message, "wait"));
        }

        let diagram = String::from_utf8_lossy(&output.stdout).trim().to_string();
        info!(bytes = diagram.len(), "Diagram generated");
        Ok(diagram)
    }
}

/// Never produces a diagram
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledDiagramGenerator;

#[async_trait]
impl DiagramGenerator for DisabledDiagramGenerator {
    fn name(&self) -> &str {
        "disabled"
    }

    async fn generate(&self, _summary: &str) -> ArchvizResult<String> {
        Err(ArchvizError::Diagram {
            message: "diagram generation is disabled".to_string(),
            provider: Some(self.name().to_string()),
            context: ErrorContext::new("diagram").with_operation("generate"),
        })
    }
}

/// Build the generator selected by `config`
pub fn create_diagram_generator(config: &DiagramConfig) -> Arc<dyn DiagramGenerator> {
    match config.provider {
        DiagramProvider::Command => Arc::new(CommandDiagramGenerator::from_config(config)),
        DiagramProvider::Disabled => Arc::new(DisabledDiagramGenerator),
    }
}
