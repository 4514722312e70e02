// Copyright 2023-5 Seth Pendergrass. See LICENSE.

//! Builds minimal JPEGs carrying only an EXIF segment, so reader tests don't
//! need binary assets or ExifTool.

/// SOI immediately followed by EOI: a valid JPEG with no EXIF.
pub const PLAIN_JPEG: &[u8] = &[0xFF, 0xD8, 0xFF, 0xD9];

const TIFF_HEADER: &[u8] = b"II\x2a\x00\x08\x00\x00\x00";

const ASCII: u16 = 2;
const LONG: u16 = 4;
const RATIONAL: u16 = 5;

const MAKE: u16 = 0x010F;
const EXIF_IFD_POINTER: u16 = 0x8769;
const GPS_IFD_POINTER: u16 = 0x8825;
const DATE_TIME_ORIGINAL: u16 = 0x9003;
const GPS_LATITUDE_REF: u16 = 1;
const GPS_LATITUDE: u16 = 2;
const GPS_LONGITUDE_REF: u16 = 3;
const GPS_LONGITUDE: u16 = 4;

#[derive(Clone)]
struct Entry {
  tag:   u16,
  kind:  u16,
  count: u32,
  data:  Vec<u8>,
}

impl Entry {
  fn ascii(tag: u16, value: &str) -> Self {
    let mut data = value.as_bytes().to_vec();
    data.push(0);

    Entry {
      tag,
      kind: ASCII,
      count: u32::try_from(data.len()).unwrap(),
      data,
    }
  }

  fn long(tag: u16, value: u32) -> Self {
    Entry {
      tag,
      kind: LONG,
      count: 1,
      data: value.to_le_bytes().to_vec(),
    }
  }

  fn rationals(tag: u16, parts: &[(u32, u32)]) -> Self {
    Entry {
      tag,
      kind: RATIONAL,
      count: u32::try_from(parts.len()).unwrap(),
      data: parts
        .iter()
        .flat_map(|(num, denom)| [num.to_le_bytes(), denom.to_le_bytes()])
        .flatten()
        .collect(),
    }
  }

  /// Bytes this entry takes in the IFD's data area (values over 4 bytes live
  /// there, word-aligned).
  fn data_len(&self) -> usize {
    if self.data.len() <= 4 {
      0
    } else {
      self.data.len().next_multiple_of(2)
    }
  }
}

/// Little-endian EXIF JPEG builder.
#[derive(Clone, Default)]
pub struct ExifJpeg {
  ifd0: Vec<Entry>,
  exif: Vec<Entry>,
  gps:  Vec<Entry>,
}

impl ExifJpeg {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn make(mut self, make: &str) -> Self {
    self.ifd0.push(Entry::ascii(MAKE, make));
    self
  }

  pub fn date_time_original(mut self, date_time: &str) -> Self {
    self.exif.push(Entry::ascii(DATE_TIME_ORIGINAL, date_time));
    self
  }

  pub fn gps(
    mut self,
    latitude: &[(u32, u32)],
    latitude_ref: &str,
    longitude: &[(u32, u32)],
    longitude_ref: &str,
  ) -> Self {
    self.gps.extend([
      Entry::ascii(GPS_LATITUDE_REF, latitude_ref),
      Entry::rationals(GPS_LATITUDE, latitude),
      Entry::ascii(GPS_LONGITUDE_REF, longitude_ref),
      Entry::rationals(GPS_LONGITUDE, longitude),
    ]);
    self
  }

  pub fn to_bytes(&self) -> Vec<u8> {
    let subs = [(EXIF_IFD_POINTER, &self.exif), (GPS_IFD_POINTER, &self.gps)]
      .into_iter()
      .filter(|(_, entries)| !entries.is_empty())
      .collect::<Vec<_>>();

    // Pointers are inline LONGs, so IFD0's size doesn't depend on their values.
    let mut ifd0 = self.ifd0.clone();
    ifd0.extend(subs.iter().map(|(tag, _)| Entry::long(*tag, 0)));

    let mut offset = TIFF_HEADER.len() + ifd_len(&ifd0);
    for (pointer, (_, entries)) in ifd0[self.ifd0.len()..].iter_mut().zip(&subs) {
      *pointer = Entry::long(pointer.tag, u32::try_from(offset).unwrap());
      offset += ifd_len(entries);
    }

    let mut tiff = TIFF_HEADER.to_vec();
    write_ifd(&mut tiff, ifd0);
    for (_, entries) in subs {
      write_ifd(&mut tiff, entries.clone());
    }

    // APP1 length counts itself and the `Exif\0\0` header.
    let app1_len = u16::try_from(2 + 6 + tiff.len()).unwrap();

    let mut jpeg = vec![0xFF, 0xD8, 0xFF, 0xE1];
    jpeg.extend(app1_len.to_be_bytes());
    jpeg.extend(b"Exif\0\0");
    jpeg.extend(tiff);
    jpeg.extend([0xFF, 0xD9]);
    jpeg
  }
}

fn ifd_len(entries: &[Entry]) -> usize {
  2 + 12 * entries.len() + 4 + entries.iter().map(Entry::data_len).sum::<usize>()
}

/// Appends an IFD (with no next IFD) followed by its data area.
fn write_ifd(tiff: &mut Vec<u8>, mut entries: Vec<Entry>) {
  entries.sort_by_key(|e| e.tag);

  let data_start = tiff.len() + 2 + 12 * entries.len() + 4;
  let mut data = Vec::new();

  tiff.extend(u16::try_from(entries.len()).unwrap().to_le_bytes());
  for entry in &entries {
    tiff.extend(entry.tag.to_le_bytes());
    tiff.extend(entry.kind.to_le_bytes());
    tiff.extend(entry.count.to_le_bytes());

    if entry.data.len() <= 4 {
      let mut inline = entry.data.clone();
      inline.resize(4, 0);
      tiff.extend(inline);
    } else {
      let value_offset = u32::try_from(data_start + data.len()).unwrap();
      tiff.extend(value_offset.to_le_bytes());
      data.extend(&entry.data);
      data.resize(data.len().next_multiple_of(2), 0);
    }
  }
  tiff.extend(0u32.to_le_bytes());
  tiff.extend(data);
}
