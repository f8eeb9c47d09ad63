#[derive(Debug, Clone)]
pub struct FileData {
    pub code: String,
    pub content: Vec<u8>,
}

impl FileData {
    pub fn new(code: String, content: Vec<u8>) -> Self {
        Self { code, content }
    }

    pub fn size(&self) -> u64 {
        self.content.len() as u64
    }
}
