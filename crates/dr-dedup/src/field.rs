use async_trait::async_trait;
use dr_core::Result;
use parking_lot::Mutex;

/// A live text value the convergence driver reads and writes between passes.
#[async_trait]
pub trait TextField: Send + Sync {
    async fn read(&self) -> Result<String>;
    async fn write(&self, value: &str) -> Result<()>;
}

/// Field held in memory. Records every write.
#[derive(Debug, Default)]
pub struct MemoryField {
    value: Mutex<String>,
    writes: Mutex<Vec<String>>,
}

impl MemoryField {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: Mutex::new(value.into()),
            writes: Mutex::new(Vec::new()),
        }
    }

    pub fn value(&self) -> String {
        self.value.lock().clone()
    }

    pub fn writes(&self) -> Vec<String> {
        self.writes.lock().clone()
    }
}

#[async_trait]
impl TextField for MemoryField {
    async fn read(&self) -> Result<String> {
        Ok(self.value.lock().clone())
    }

    async fn write(&self, value: &str) -> Result<()> {
        *self.value.lock() = value.to_string();
        self.writes.lock().push(value.to_string());
        Ok(())
    }
}
