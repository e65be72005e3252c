/*
Copyright 2025 Connor Nolan

Licensed under the Apache License, Version 2.0 (the "License");
you may not use this file except in compliance with the License.
You may obtain a copy of the License at

    http://www.apache.org/licenses/LICENSE-2.0

Unless required by applicable law or agreed to in writing, software
distributed under the License is distributed on an "AS IS" BASIS,
WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
See the License for the specific language governing permissions and
limitations under the License.
*/

pub const DATA_ORG: u32 = 0x1001_0000;
pub const TEXT_ORG: u32 = 0x0040_0000;

/// The two output segments. The discriminants index the address-cursor
/// array, so Data must stay 0 and Text 1.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SegmentId {
    Data = 0,
    Text = 1,
}

impl SegmentId {
    pub const ALL: [SegmentId; 2] = [SegmentId::Data, SegmentId::Text];

    pub fn origin(self) -> u32 {
        match self {
            SegmentId::Data => DATA_ORG,
            SegmentId::Text => TEXT_ORG,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            SegmentId::Data => ".data",
            SegmentId::Text => ".text",
        }
    }
}

/// One output segment: a byte image starting at the segment origin. Bytes
/// not explicitly written stay zero.
#[derive(Debug, Clone)]
pub struct Segment {
    pub id: SegmentId,
    pub data: Vec<u8>,
}

impl Segment {
    pub fn new(id: SegmentId, size: usize) -> Self {
        Self {
            id,
            data: vec![0; size],
        }
    }

    pub fn size(&self) -> usize {
        self.data.len()
    }
}

/// The per-segment address cursors. Both passes advance these identically;
/// that agreement is what makes forward references resolve correctly.
#[derive(Debug, Clone)]
pub struct AddressCursor {
    addr: [u32; 2],
}

impl AddressCursor {
    pub fn new() -> Self {
        Self {
            addr: [DATA_ORG, TEXT_ORG],
        }
    }

    pub fn get(&self, segment: SegmentId) -> u32 {
        self.addr[segment as usize]
    }

    pub fn set(&mut self, segment: SegmentId, addr: u32) {
        self.addr[segment as usize] = addr;
    }

    pub fn advance(&mut self, segment: SegmentId, bytes: u32) {
        self.addr[segment as usize] += bytes;
    }

    /// Bytes emitted into the segment so far.
    pub fn offset(&self, segment: SegmentId) -> u32 {
        self.get(segment) - segment.origin()
    }
}

impl Default for AddressCursor {
    fn default() -> Self {
        Self::new()
    }
}
