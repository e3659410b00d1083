use async_trait::async_trait;
use std::{
    fmt::Debug,
    io::{self, Write},
    sync::Mutex,
};

use crate::model::IconRef;

/// What the briefing needs from the robot: a voice and a face.
#[async_trait]
pub trait Robot: Send + Sync + Debug {
    async fn speak(&self, text: &str) -> anyhow::Result<()>;

    async fn render(&self, icon: IconRef) -> anyhow::Result<()>;
}

/// Stand-in robot that prints speech and face changes to a writer (stdout by default).
#[derive(Debug)]
pub struct ConsoleRobot<W: Write + Send + Debug = io::Stdout> {
    out: Mutex<W>,
}

impl ConsoleRobot {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write + Send + Debug> ConsoleRobot<W> {
    pub fn new(out: W) -> Self {
        Self { out: Mutex::new(out) }
    }

    pub fn into_inner(self) -> W {
        self.out.into_inner().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write_line(&self, line: &str) -> anyhow::Result<()> {
        let mut out = self.out.lock().map_err(|_| anyhow::anyhow!("console output lock poisoned"))?;
        writeln!(out, "{line}")?;
        out.flush()?;
        Ok(())
    }
}

#[async_trait]
impl<W: Write + Send + Debug> Robot for ConsoleRobot<W> {
    async fn speak(&self, text: &str) -> anyhow::Result<()> {
        tracing::debug!(%text, "speak");
        self.write_line(&format!("[say]  {text}"))
    }

    async fn render(&self, icon: IconRef) -> anyhow::Result<()> {
        tracing::debug!(%icon, "render");
        self.write_line(&format!("[face] {} {icon}", icon.glyph()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn console_robot_writes_speech_and_face() {
        let robot = ConsoleRobot::new(Vec::new());

        robot.render(IconRef::Rain).await.unwrap();
        robot.speak("It's rainy today").await.unwrap();

        let out = String::from_utf8(robot.into_inner()).unwrap();
        assert_eq!(out, "[face] 🌧 rain\n[say]  It's rainy today\n");
    }
}
