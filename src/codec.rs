//! Extension-driven streaming decode chain.
//!
//! The save file name's dot-separated extension segments select the chain:
//! each segment matching a known codec contributes one transform, and
//! decoding peels them from the rightmost segment inward, so `a.tar.gz` is
//! gunzipped and then un-tarred. Unknown segments pass through; a name with
//! no recognized segment is an identity copy.

use flate2::read::GzDecoder;
use std::io::{self, Read, Seek, Write};
use tar::Archive;
use zip::ZipArchive;

/// One streaming transform, named after the extension segment that
/// selects it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Codec {
    Tar,
    Gz,
    Zip,
}

impl Codec {
    fn from_segment(segment: &str) -> Option<Self> {
        match segment {
            "tar" => Some(Codec::Tar),
            "gz" => Some(Codec::Gz),
            "zip" => Some(Codec::Zip),
            _ => None,
        }
    }
}

/// Codecs selected by `name`, in the order their segments appear.
///
/// The base stem is data, not instruction: a file literally named `gz`
/// selects nothing.
pub(crate) fn chain_for(name: &str) -> Vec<Codec> {
    name.split('.')
        .skip(1)
        .filter_map(Codec::from_segment)
        .collect()
}

/// Drive `reader` through the chain into `writer`, returning the bytes
/// written.
///
/// Unarchiving stages extract the first regular file entry and feed its
/// contents to the rest of the chain; release archives carry a single
/// binary. The zip stage spools its input to an unnamed temp file first
/// because the central directory sits at the end of the payload.
pub(crate) fn decode(
    chain: &[Codec],
    mut reader: Box<dyn Read + '_>,
    writer: &mut dyn Write,
) -> io::Result<u64> {
    let Some((outer, inner)) = chain.split_last() else {
        return io::copy(&mut reader, writer);
    };

    match outer {
        Codec::Gz => decode(inner, Box::new(GzDecoder::new(reader)), writer),
        Codec::Tar => {
            let mut archive = Archive::new(reader);
            for entry in archive.entries()? {
                let entry = entry?;
                if entry.header().entry_type().is_file() {
                    return decode(inner, Box::new(entry), writer);
                }
            }
            Err(no_file_entry("tar"))
        }
        Codec::Zip => {
            let mut spool = tempfile::tempfile()?;
            io::copy(&mut reader, &mut spool)?;
            spool.rewind()?;
            let mut archive = ZipArchive::new(spool).map_err(invalid_archive)?;
            for index in 0..archive.len() {
                let entry = archive.by_index(index).map_err(invalid_archive)?;
                if entry.is_file() {
                    return decode(inner, Box::new(entry), writer);
                }
            }
            Err(no_file_entry("zip"))
        }
    }
}

fn no_file_entry(format: &str) -> io::Error {
    io::Error::new(
        io::ErrorKind::InvalidData,
        format!("{format} archive contains no regular file"),
    )
}

fn invalid_archive(err: zip::result::ZipError) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidData, err)
}
