use std::path::Path;
use std::sync::Arc;

use anyhow::Context;

use crate::{
    assets::decode,
    assets::display_url::{DisplayUrl, UrlRegistry},
    foundation::core::NativeSize,
    foundation::error::DrapeResult,
    foundation::math::Fnv1a64,
};

/// The two asset slots of a stage.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotKind {
    /// Garment photograph.
    Base,
    /// Graphic placed over the base.
    Design,
}

impl SlotKind {
    /// Multipart field name the compositing service expects for this slot.
    pub fn form_field(self) -> &'static str {
        match self {
            Self::Base => "base_photo",
            Self::Design => "design",
        }
    }
}

impl std::fmt::Display for SlotKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Base => "base",
            Self::Design => "design",
        })
    }
}

#[derive(Clone)]
/// Uploaded binary asset: encoded bytes plus the filename and MIME type it arrived with.
pub struct AssetFile {
    name: String,
    mime: String,
    bytes: Arc<Vec<u8>>,
}

impl std::fmt::Debug for AssetFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AssetFile")
            .field("name", &self.name)
            .field("mime", &self.mime)
            .field("len", &self.bytes.len())
            .finish()
    }
}

impl AssetFile {
    /// Wrap in-memory bytes; the MIME type is sniffed from the content.
    pub fn new(name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        let bytes: Vec<u8> = bytes.into();
        let mime = decode::sniff_mime(&bytes)
            .unwrap_or("application/octet-stream")
            .to_string();
        Self {
            name: name.into(),
            mime,
            bytes: Arc::new(bytes),
        }
    }

    /// Read a file from disk.
    pub fn from_path(path: &Path) -> DrapeResult<Self> {
        let bytes =
            std::fs::read(path).with_context(|| format!("read asset '{}'", path.display()))?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".to_string());
        Ok(Self::new(name, bytes))
    }

    /// Original filename.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// MIME type sent with the multipart part.
    pub fn mime(&self) -> &str {
        &self.mime
    }

    /// Encoded bytes.
    pub fn bytes(&self) -> &[u8] {
        self.bytes.as_slice()
    }

    /// Content hash, stable across runs.
    pub fn fingerprint(&self) -> u64 {
        let mut h = Fnv1a64::new();
        h.write_bytes(self.bytes.as_slice());
        h.finish()
    }
}

/// Handle for delivering one asynchronous decode result back to its slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct DecodeTicket {
    /// Slot the decode belongs to.
    pub slot: SlotKind,
    /// Assignment generation; a ticket from a replaced asset is stale.
    pub generation: u64,
}

/// Identity of a simultaneously-available (base, design) pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct AssetPairKey {
    /// Generation of the base slot's current asset.
    pub base: u64,
    /// Generation of the design slot's current asset.
    pub design: u64,
}

#[derive(Debug)]
struct LoadedAsset {
    file: AssetFile,
    url: DisplayUrl,
    generation: u64,
    native: Option<NativeSize>,
}

/// One asset slot. Holds at most one asset and therefore at most one live display URL.
#[derive(Debug)]
pub struct AssetSlot {
    kind: SlotKind,
    current: Option<LoadedAsset>,
    generation: u64,
}

impl AssetSlot {
    /// Empty slot.
    pub fn new(kind: SlotKind) -> Self {
        Self {
            kind,
            current: None,
            generation: 0,
        }
    }

    /// Slot kind.
    pub fn kind(&self) -> SlotKind {
        self.kind
    }

    /// Replace the slot's asset. The previous display URL is released before returning.
    pub fn assign(&mut self, file: AssetFile, urls: &UrlRegistry) -> DecodeTicket {
        self.generation += 1;
        let url = urls.acquire(self.kind);
        tracing::debug!(
            slot = %self.kind,
            generation = self.generation,
            name = file.name(),
            fingerprint = file.fingerprint(),
            "asset assigned"
        );
        self.current = Some(LoadedAsset {
            file,
            url,
            generation: self.generation,
            native: None,
        });
        DecodeTicket {
            slot: self.kind,
            generation: self.generation,
        }
    }

    /// Drop the slot's asset. Returns whether anything was held.
    pub fn clear(&mut self) -> bool {
        self.current.take().is_some()
    }

    /// Record a decode completion. Stale or foreign tickets are ignored and return `false`.
    pub fn complete(&mut self, ticket: DecodeTicket, native: NativeSize) -> bool {
        if ticket.slot != self.kind {
            return false;
        }
        match self.current.as_mut() {
            Some(loaded) if loaded.generation == ticket.generation => {
                loaded.native = Some(native);
                true
            }
            _ => {
                tracing::debug!(
                    slot = %self.kind,
                    generation = ticket.generation,
                    "stale decode ignored"
                );
                false
            }
        }
    }

    /// Current file, decoded or not.
    pub fn file(&self) -> Option<&AssetFile> {
        self.current.as_ref().map(|l| &l.file)
    }

    /// Current display URL.
    pub fn display_url(&self) -> Option<&str> {
        self.current.as_ref().map(|l| l.url.as_str())
    }

    /// Native size once the decode has completed.
    pub fn native_size(&self) -> Option<NativeSize> {
        self.current.as_ref().and_then(|l| l.native)
    }

    /// Whether the asset is present and decoded.
    pub fn is_ready(&self) -> bool {
        self.native_size().is_some()
    }

    /// Generation of the current asset, only once decoded.
    pub fn ready_generation(&self) -> Option<u64> {
        self.current
            .as_ref()
            .filter(|l| l.native.is_some())
            .map(|l| l.generation)
    }

    /// Ticket for the current asset while its decode is outstanding.
    pub fn pending_ticket(&self) -> Option<DecodeTicket> {
        self.current
            .as_ref()
            .filter(|l| l.native.is_none())
            .map(|l| DecodeTicket {
                slot: self.kind,
                generation: l.generation,
            })
    }
}

/// Base and design slots sharing one URL registry.
#[derive(Debug)]
pub struct AssetLibrary {
    urls: UrlRegistry,
    base: AssetSlot,
    design: AssetSlot,
}

impl Default for AssetLibrary {
    fn default() -> Self {
        Self::new(UrlRegistry::new())
    }
}

impl AssetLibrary {
    /// Empty library issuing URLs from `urls`.
    pub fn new(urls: UrlRegistry) -> Self {
        Self {
            urls,
            base: AssetSlot::new(SlotKind::Base),
            design: AssetSlot::new(SlotKind::Design),
        }
    }

    /// Registry backing the display URLs.
    pub fn urls(&self) -> &UrlRegistry {
        &self.urls
    }

    /// Slot by kind.
    pub fn slot(&self, kind: SlotKind) -> &AssetSlot {
        match kind {
            SlotKind::Base => &self.base,
            SlotKind::Design => &self.design,
        }
    }

    fn slot_mut(&mut self, kind: SlotKind) -> &mut AssetSlot {
        match kind {
            SlotKind::Base => &mut self.base,
            SlotKind::Design => &mut self.design,
        }
    }

    /// Replace the asset in `kind`.
    pub fn assign(&mut self, kind: SlotKind, file: AssetFile) -> DecodeTicket {
        let urls = self.urls.clone();
        self.slot_mut(kind).assign(file, &urls)
    }

    /// Clear the asset in `kind`.
    pub fn clear(&mut self, kind: SlotKind) -> bool {
        self.slot_mut(kind).clear()
    }

    /// Route a decode completion to its slot.
    pub fn complete(&mut self, ticket: DecodeTicket, native: NativeSize) -> bool {
        self.slot_mut(ticket.slot).complete(ticket, native)
    }

    /// Identity of the current pair once both assets are decoded.
    pub fn ready_pair(&self) -> Option<AssetPairKey> {
        Some(AssetPairKey {
            base: self.base.ready_generation()?,
            design: self.design.ready_generation()?,
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/library.rs"]
mod tests;
