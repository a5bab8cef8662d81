use std::env;
use std::io::Write;

use anyhow::Result;
use base64::{Engine as _, engine::general_purpose::STANDARD};

/// Most terminals cap OSC 52 payloads around 100 KB of base64.
const MAX_PAYLOAD: usize = 100_000;

/// Copie `text` dans le presse-papiers système via OSC 52.
///
/// La séquence part sur stdout, donc elle traverse SSH sans rien
/// installer côté serveur. Sous tmux elle est emballée en passthrough
/// DCS (nécessite `allow-passthrough` en tmux 3.3+).
///
/// # Errors
/// Returns an error if the payload exceeds the OSC 52 size cap or if
/// stdout cannot be written.
pub fn copy_to_clipboard(text: &str) -> Result<()> {
    let seq = osc52_sequence(text)?;
    let mut out = std::io::stdout().lock();
    if env::var_os("TMUX").is_some() {
        write_tmux_passthrough(&mut out, seq.as_bytes())?;
    } else {
        out.write_all(seq.as_bytes())?;
    }
    out.flush()?;
    Ok(())
}

/// Build the raw `ESC ] 52 ; c ; <base64> BEL` sequence.
fn osc52_sequence(text: &str) -> Result<String> {
    let encoded = STANDARD.encode(text.as_bytes());
    if encoded.len() > MAX_PAYLOAD {
        anyhow::bail!(
            "Contenu trop gros pour OSC 52 ({} > {MAX_PAYLOAD})",
            encoded.len()
        );
    }
    Ok(format!("\x1b]52;c;{encoded}\x07"))
}

/// Wrap a sequence in tmux DCS passthrough: `ESC P tmux;` then the
/// sequence with every ESC doubled, then `ESC \`.
fn write_tmux_passthrough(writer: &mut impl Write, seq: &[u8]) -> Result<()> {
    writer.write_all(b"\x1bPtmux;")?;
    for &byte in seq {
        if byte == 0x1b {
            writer.write_all(b"\x1b\x1b")?;
        } else {
            writer.write_all(&[byte])?;
        }
    }
    writer.write_all(b"\x1b\\")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sequence_encodes_payload() {
        let seq = osc52_sequence("hi").unwrap();
        let expected = format!("\x1b]52;c;{}\x07", STANDARD.encode("hi"));
        assert_eq!(seq, expected);
    }

    #[test]
    fn oversized_payload_is_rejected() {
        let big = "x".repeat(MAX_PAYLOAD);
        assert!(osc52_sequence(&big).is_err());
    }

    #[test]
    fn tmux_passthrough_doubles_escapes() {
        let seq = osc52_sequence("data").unwrap();
        let mut out = Vec::new();
        write_tmux_passthrough(&mut out, seq.as_bytes()).unwrap();
        assert!(out.starts_with(b"\x1bPtmux;\x1b\x1b]52;c;"));
        assert!(out.ends_with(b"\x1b\\"));
    }
}
