use burptocaido_types::{Body, BodyEncoding, Item};
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::str::FromStr;

use crate::{Error, Result};

/// Element name of one history record.
pub const ITEM_TAG: &[u8] = b"item";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Time,
    Url,
    Host,
    Port,
    Protocol,
    Method,
    Path,
    Extension,
    Request,
    Status,
    ResponseLength,
    MimeType,
    Response,
    Comment,
}

const FIELD_COUNT: usize = 14;

impl Field {
    fn from_tag(tag: &[u8]) -> Option<Self> {
        let field = match tag {
            b"time" => Field::Time,
            b"url" => Field::Url,
            b"host" => Field::Host,
            b"port" => Field::Port,
            b"protocol" => Field::Protocol,
            b"method" => Field::Method,
            b"path" => Field::Path,
            b"extension" => Field::Extension,
            b"request" => Field::Request,
            b"status" => Field::Status,
            b"responselength" => Field::ResponseLength,
            b"mimetype" => Field::MimeType,
            b"response" => Field::Response,
            b"comment" => Field::Comment,
            _ => return None,
        };
        Some(field)
    }

    fn tag(self) -> &'static str {
        match self {
            Field::Time => "time",
            Field::Url => "url",
            Field::Host => "host",
            Field::Port => "port",
            Field::Protocol => "protocol",
            Field::Method => "method",
            Field::Path => "path",
            Field::Extension => "extension",
            Field::Request => "request",
            Field::Status => "status",
            Field::ResponseLength => "responselength",
            Field::MimeType => "mimetype",
            Field::Response => "response",
            Field::Comment => "comment",
        }
    }
}

/// Child element text collected for one `<item>`.
#[derive(Default)]
struct ItemFields {
    values: [Option<String>; FIELD_COUNT],
    request_encoding: BodyEncoding,
    response_encoding: BodyEncoding,
}

impl ItemFields {
    fn open(&mut self, field: Field, encoding: BodyEncoding) {
        self.values[field as usize] = Some(String::new());
        match field {
            Field::Request => self.request_encoding = encoding,
            Field::Response => self.response_encoding = encoding,
            _ => {}
        }
    }

    fn push(&mut self, field: Field, text: &str) {
        self.values[field as usize]
            .get_or_insert_with(String::new)
            .push_str(text);
    }

    fn take(&mut self, field: Field) -> Option<String> {
        self.values[field as usize].take()
    }

    fn required(&mut self, field: Field, position: usize) -> Result<String> {
        self.take(field).ok_or_else(|| Error::Decode {
            position,
            message: format!("missing <{}>", field.tag()),
        })
    }

    fn optional(&mut self, field: Field) -> String {
        self.take(field).unwrap_or_default()
    }

    /// Empty text reads as zero; Burp leaves `<status>` and
    /// `<responselength>` empty for requests that never got a response.
    fn number<T: FromStr + Default>(&mut self, field: Field, position: usize) -> Result<T> {
        let raw = self.required(field, position)?;
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Ok(T::default());
        }
        trimmed.parse().map_err(|_| Error::Decode {
            position,
            message: format!("<{}> is not a valid number: {:?}", field.tag(), raw),
        })
    }

    fn finish(mut self, position: usize) -> Result<Item> {
        let request = self.required(Field::Request, position)?;
        let response = self.required(Field::Response, position)?;

        Ok(Item {
            time: self.required(Field::Time, position)?,
            url: self.optional(Field::Url),
            host: self.required(Field::Host, position)?,
            port: self.number(Field::Port, position)?,
            protocol: self.required(Field::Protocol, position)?,
            method: self.required(Field::Method, position)?,
            path: self.required(Field::Path, position)?,
            extension: self.optional(Field::Extension),
            request: Body {
                text: request,
                encoding: self.request_encoding,
            },
            status: self.number(Field::Status, position)?,
            response_length: self.number(Field::ResponseLength, position)?,
            mime_type: self.optional(Field::MimeType),
            response: Body {
                text: response,
                encoding: self.response_encoding,
            },
            comment: self.optional(Field::Comment),
        })
    }
}

fn body_encoding(start: &BytesStart<'_>, offset: u64) -> Result<BodyEncoding> {
    for attr in start.attributes() {
        let attr = attr.map_err(|err| Error::Xml {
            offset,
            source: quick_xml::Error::from(err),
        })?;
        if attr.key.local_name().as_ref() == b"base64" && attr.value.as_ref() == b"false" {
            return Ok(BodyEncoding::Plain);
        }
    }
    Ok(BodyEncoding::Base64)
}

/// Forward-only reader over the `<item>` elements of a Burp history export.
///
/// Items are decoded one at a time, so memory use does not grow with the
/// size of the export. Elements other than `<item>` are skipped. The first
/// error ends the iteration.
pub struct ItemReader<R: BufRead> {
    reader: Reader<R>,
    buf: Vec<u8>,
    position: usize,
    finished: bool,
}

impl ItemReader<BufReader<File>> {
    /// Open an export file for reading.
    pub fn open(path: &Path) -> Result<Self> {
        let file = File::open(path)?;
        Ok(Self::new(BufReader::new(file)))
    }
}

impl<R: BufRead> ItemReader<R> {
    pub fn new(input: R) -> Self {
        Self {
            reader: Reader::from_reader(input),
            buf: Vec::new(),
            position: 0,
            finished: false,
        }
    }

    /// 1-based position of the most recently started `<item>`; 0 before the first.
    pub fn item_position(&self) -> usize {
        self.position
    }

    fn next_item(&mut self) -> Result<Option<Item>> {
        loop {
            self.buf.clear();
            let event = match self.reader.read_event_into(&mut self.buf) {
                Ok(event) => event,
                Err(source) => {
                    return Err(Error::Xml {
                        offset: self.reader.buffer_position() as u64,
                        source,
                    });
                }
            };

            match event {
                Event::Start(start) if start.local_name().as_ref() == ITEM_TAG => {
                    self.position += 1;
                    return self.read_item().map(Some);
                }
                Event::Empty(empty) if empty.local_name().as_ref() == ITEM_TAG => {
                    self.position += 1;
                    return ItemFields::default().finish(self.position).map(Some);
                }
                Event::Eof => return Ok(None),
                _ => {}
            }
        }
    }

    /// Consume events up to the matching `</item>`.
    fn read_item(&mut self) -> Result<Item> {
        let mut fields = ItemFields::default();
        let mut current: Option<Field> = None;
        let mut depth = 0usize;

        loop {
            self.buf.clear();
            let event = match self.reader.read_event_into(&mut self.buf) {
                Ok(event) => event,
                Err(source) => {
                    return Err(Error::Xml {
                        offset: self.reader.buffer_position() as u64,
                        source,
                    });
                }
            };
            let offset = self.reader.buffer_position() as u64;

            match event {
                Event::Start(start) => {
                    depth += 1;
                    if depth == 1 {
                        current = Field::from_tag(start.local_name().as_ref());
                        if let Some(field) = current {
                            fields.open(field, body_encoding(&start, offset)?);
                        }
                    }
                }
                Event::Empty(empty) => {
                    if depth == 0
                        && let Some(field) = Field::from_tag(empty.local_name().as_ref())
                    {
                        fields.open(field, body_encoding(&empty, offset)?);
                    }
                }
                Event::Text(text) => {
                    if let Some(field) = current {
                        let text = text.unescape().map_err(|err| Error::Xml {
                            offset,
                            source: quick_xml::Error::from(err),
                        })?;
                        fields.push(field, &text);
                    }
                }
                Event::CData(cdata) => {
                    if let Some(field) = current {
                        let text = std::str::from_utf8(&cdata).map_err(|_| Error::Decode {
                            position: self.position,
                            message: format!("<{}> CDATA is not valid UTF-8", field.tag()),
                        })?;
                        fields.push(field, text);
                    }
                }
                Event::End(_) => {
                    if depth == 0 {
                        return fields.finish(self.position);
                    }
                    depth -= 1;
                    if depth == 0 {
                        current = None;
                    }
                }
                Event::Eof => {
                    return Err(Error::Decode {
                        position: self.position,
                        message: "input ended inside <item>".to_string(),
                    });
                }
                _ => {}
            }
        }
    }
}

impl<R: BufRead> Iterator for ItemReader<R> {
    type Item = Result<Item>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        match self.next_item() {
            Ok(Some(item)) => Some(Ok(item)),
            Ok(None) => {
                self.finished = true;
                None
            }
            Err(err) => {
                self.finished = true;
                Some(Err(err))
            }
        }
    }
}
