//! Hand-written fakes shared by the integration tests.
#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use bytes::Bytes;
use chrono::{DateTime, Duration, TimeZone, Utc};
use cs_app::{ClipboardHistory, HistoryDeps, UseCases};
use cs_core::ports::{
    ClockPort, HistoryObserverPort, ImageDecodePort, ImageDimensions, OcrPort,
    SystemClipboardPort,
};
use cs_core::{ClipboardFormat, ClipboardWriteItem, HistoryConfig};
use cs_infra::Sha256Hasher;
use tokio::sync::oneshot;

/// Prefix marking fake image payloads the fake decoder accepts.
pub const IMAGE_MAGIC: &[u8] = b"IMG:";

pub fn image_bytes(tag: &str) -> Vec<u8> {
    let mut bytes = IMAGE_MAGIC.to_vec();
    bytes.extend_from_slice(tag.as_bytes());
    bytes
}

#[derive(Default)]
struct ClipboardState {
    change_count: u64,
    reencode_images: bool,
    items: Vec<(ClipboardFormat, Vec<u8>)>,
    writes: Vec<Vec<ClipboardWriteItem>>,
}

/// In-memory clipboard with a change counter bumped on every mutation.
#[derive(Default)]
pub struct FakeClipboard {
    state: Mutex<ClipboardState>,
}

impl FakeClipboard {
    pub fn set_text(&self, text: &str) {
        self.set(vec![(ClipboardFormat::text_plain(), text.as_bytes().to_vec())]);
    }

    pub fn set(&self, items: Vec<(ClipboardFormat, Vec<u8>)>) {
        let mut state = self.state.lock().unwrap();
        state.items = items;
        state.change_count += 1;
    }

    /// Make image writes read back as different bytes, the way native
    /// clipboards hand back a re-encoded bitmap.
    pub fn reencode_images(&self) {
        self.state.lock().unwrap().reencode_images = true;
    }

    pub fn writes(&self) -> Vec<Vec<ClipboardWriteItem>> {
        self.state.lock().unwrap().writes.clone()
    }

    fn record_write(&self, items: Vec<ClipboardWriteItem>) {
        let mut state = self.state.lock().unwrap();
        let reencode_images = state.reencode_images;
        state.items = items
            .iter()
            .map(|item| {
                let bytes = match item {
                    ClipboardWriteItem::Text(text)
                    | ClipboardWriteItem::Html(text)
                    | ClipboardWriteItem::FileUrl(text) => text.as_bytes().to_vec(),
                    ClipboardWriteItem::Image(bytes) if reencode_images => {
                        let mut reencoded = bytes.clone();
                        reencoded.extend_from_slice(b":reencoded");
                        reencoded
                    }
                    ClipboardWriteItem::Rtf(bytes)
                    | ClipboardWriteItem::Image(bytes)
                    | ClipboardWriteItem::Raw { bytes, .. } => bytes.clone(),
                };
                (item.format(), bytes)
            })
            .collect();
        state.writes.push(items);
        state.change_count += 1;
    }
}

impl SystemClipboardPort for FakeClipboard {
    fn change_count(&self) -> u64 {
        self.state.lock().unwrap().change_count
    }

    fn available_formats(&self) -> Result<Vec<ClipboardFormat>> {
        let state = self.state.lock().unwrap();
        Ok(state.items.iter().map(|(format, _)| format.clone()).collect())
    }

    fn read_string(&self, format: &ClipboardFormat) -> Result<Option<String>> {
        match self.read_bytes(format)? {
            Some(bytes) => Ok(Some(String::from_utf8(bytes)?)),
            None => Ok(None),
        }
    }

    fn read_bytes(&self, format: &ClipboardFormat) -> Result<Option<Vec<u8>>> {
        let state = self.state.lock().unwrap();
        Ok(state
            .items
            .iter()
            .find(|(candidate, _)| candidate == format)
            .map(|(_, bytes)| bytes.clone()))
    }

    fn write_string(&self, text: &str) -> Result<()> {
        self.record_write(vec![ClipboardWriteItem::Text(text.to_string())]);
        Ok(())
    }

    fn write_objects(&self, items: Vec<ClipboardWriteItem>) -> Result<()> {
        self.record_write(items);
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        self.record_write(Vec::new());
        Ok(())
    }
}

/// Accepts payloads starting with [`IMAGE_MAGIC`].
pub struct FakeDecoder;

impl ImageDecodePort for FakeDecoder {
    fn decode(&self, bytes: &[u8]) -> Result<ImageDimensions> {
        if bytes.starts_with(IMAGE_MAGIC) {
            Ok(ImageDimensions {
                width: 1,
                height: 1,
            })
        } else {
            Err(anyhow!("unsupported image"))
        }
    }
}

pub struct ManualClock {
    now: Mutex<DateTime<Utc>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            now: Mutex::new(Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()),
        }
    }

    pub fn advance(&self, by: Duration) {
        *self.now.lock().unwrap() += by;
    }
}

impl ClockPort for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap()
    }
}

#[derive(Default)]
pub struct CountingObserver {
    count: AtomicUsize,
}

impl CountingObserver {
    pub fn count(&self) -> usize {
        self.count.load(Ordering::SeqCst)
    }
}

impl HistoryObserverPort for CountingObserver {
    fn entries_changed(&self) {
        self.count.fetch_add(1, Ordering::SeqCst);
    }
}

/// OCR answering every request with the same result.
pub struct StaticOcr {
    result: std::result::Result<Vec<String>, String>,
}

impl StaticOcr {
    pub fn lines(lines: &[&str]) -> Self {
        Self {
            result: Ok(lines.iter().map(|line| line.to_string()).collect()),
        }
    }

    pub fn failing() -> Self {
        Self {
            result: Err("recognition failed".to_string()),
        }
    }
}

#[async_trait]
impl OcrPort for StaticOcr {
    async fn recognize(&self, _image_bytes: Bytes) -> Result<Vec<String>> {
        self.result.clone().map_err(|message| anyhow!(message))
    }
}

pub type OcrReply = std::result::Result<Vec<String>, String>;

/// OCR whose answers are released by the test, one gate per request.
#[derive(Default)]
pub struct GatedOcr {
    gates: Mutex<VecDeque<oneshot::Receiver<OcrReply>>>,
    calls: AtomicUsize,
}

impl GatedOcr {
    /// Register the gate for the next recognition request.
    pub fn gate(&self) -> oneshot::Sender<OcrReply> {
        let (sender, receiver) = oneshot::channel();
        self.gates.lock().unwrap().push_back(receiver);
        sender
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl OcrPort for GatedOcr {
    async fn recognize(&self, _image_bytes: Bytes) -> Result<Vec<String>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let gate = self
            .gates
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| anyhow!("no gate registered"))?;
        match gate.await {
            Ok(reply) => reply.map_err(|message| anyhow!(message)),
            Err(_) => Err(anyhow!("gate dropped")),
        }
    }
}

pub struct Harness {
    pub history: Arc<ClipboardHistory>,
    pub usecases: UseCases,
    pub clipboard: Arc<FakeClipboard>,
    pub clock: Arc<ManualClock>,
    pub observer: Arc<CountingObserver>,
}

impl Harness {
    pub fn new() -> Self {
        Self::build(Arc::new(StaticOcr::lines(&[])), HistoryConfig::default())
    }

    pub fn with_ocr(ocr: Arc<dyn OcrPort>) -> Self {
        Self::build(ocr, HistoryConfig::default())
    }

    pub fn with_config(config: HistoryConfig) -> Self {
        Self::build(Arc::new(StaticOcr::lines(&[])), config)
    }

    pub fn build(ocr: Arc<dyn OcrPort>, config: HistoryConfig) -> Self {
        let clipboard = Arc::new(FakeClipboard::default());
        let clock = Arc::new(ManualClock::new());
        let observer = Arc::new(CountingObserver::default());

        let history = ClipboardHistory::new(
            HistoryDeps {
                clipboard: clipboard.clone(),
                ocr,
                observer: observer.clone(),
                hasher: Arc::new(Sha256Hasher),
                image_decoder: Arc::new(FakeDecoder),
                clock: clock.clone(),
            },
            config,
        )
        .expect("valid config");

        Self {
            usecases: UseCases::new(history.clone()),
            history,
            clipboard,
            clock,
            observer,
        }
    }

    /// Put `text` on the clipboard and run one capture.
    pub async fn copy_text(&self, text: &str) -> Option<cs_core::EntryId> {
        self.clipboard.set_text(text);
        self.usecases.capture_clipboard().execute().await
    }

    pub async fn contents(&self) -> Vec<String> {
        self.history
            .entries()
            .await
            .iter()
            .map(|entry| entry.content().to_string())
            .collect()
    }
}
