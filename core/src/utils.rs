use crc32fast::Hasher;

/// CRC-32/IEEE as used for the Ethernet FCS.
pub fn compute_crc32(data: &[u8]) -> u32 {
    let mut hasher = Hasher::new();
    hasher.update(data);
    hasher.finalize()
}

/// Multi-line hex dump for debug logs, 16 bytes per row.
pub fn hexdump(data: &[u8]) -> String {
    data.chunks(16)
        .enumerate()
        .map(|(row, chunk)| {
            let bytes: Vec<String> = chunk.iter().map(|b| hex::encode([*b])).collect();
            format!("{:04x}  {}", row * 16, bytes.join(" "))
        })
        .collect::<Vec<_>>()
        .join("\n")
}
