//! XML descriptor parser.
//!
//! This module reads a declarative XML description of a package's record
//! types into a [`PackageDocument`]:
//!
//! ```xml
//! <package path="example.com/app/users">
//!     <record name="User">
//!         <field name="email" tag='gooptions:"-"'><basic name="string"/></field>
//!         <field name="Created"><named package="time" name="Time"/></field>
//!         <field name="Tags"><map><key><basic name="string"/></key><value><slice><basic name="int"/></slice></value></map></field>
//!     </record>
//! </package>
//! ```

use crate::descriptor::{
    FieldDescriptor, PackageDescriptor, PackageDocument, ParamDescriptor, RecordDescriptor,
    TypeDescriptor,
};
use crate::error::ParseError;
use crate::types::ChanDir;
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

/// Parses an XML descriptor document from a string.
///
/// # Arguments
/// * `xml` - XML descriptor content
///
/// # Returns
/// Parsed package document or parse error.
///
/// # Errors
/// Returns `ParseError` if the XML is malformed or contains invalid descriptor elements.
pub fn parse_document(xml: &str) -> Result<PackageDocument, ParseError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut document: Option<PackageDocument> = None;
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => {
                let name_bytes = e.name().as_ref().to_vec();
                let name = std::str::from_utf8(&name_bytes)?;
                match name {
                    "package" if document.is_none() => {
                        let mut doc = parse_package(e)?;
                        parse_records(&mut reader, &mut doc)?;
                        document = Some(doc);
                    }
                    other => return Err(ParseError::unknown_element(other, "document")),
                }
            }
            Ok(Event::Empty(ref e)) => {
                let name_bytes = e.name().as_ref().to_vec();
                let name = std::str::from_utf8(&name_bytes)?;
                match name {
                    "package" if document.is_none() => document = Some(parse_package(e)?),
                    other => return Err(ParseError::unknown_element(other, "document")),
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(ParseError::Xml(e)),
            _ => {}
        }
        buf.clear();
    }

    document.ok_or_else(|| ParseError::structure("No package element found"))
}

/// Parses the package element attributes.
fn parse_package(e: &BytesStart<'_>) -> Result<PackageDocument, ParseError> {
    let mut path = None;
    let mut name = None;

    for (key, value) in attributes(e)? {
        match key.as_str() {
            "path" => path = Some(value),
            "name" => name = Some(value),
            _ => {}
        }
    }

    let path = path.ok_or_else(|| ParseError::missing_attr("package", "path"))?;

    Ok(PackageDocument {
        package: PackageDescriptor { path, name },
        records: Vec::new(),
    })
}

/// Parses the records of a package until its end tag.
fn parse_records(
    reader: &mut Reader<&[u8]>,
    document: &mut PackageDocument,
) -> Result<(), ParseError> {
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => {
                let record = parse_record(reader, e, false)?;
                add_record(document, record)?;
            }
            Ok(Event::Empty(ref e)) => {
                let record = parse_record(reader, e, true)?;
                add_record(document, record)?;
            }
            Ok(Event::End(_)) => break,
            Ok(Event::Eof) => return Err(ParseError::structure("unterminated package element")),
            Err(e) => return Err(ParseError::Xml(e)),
            _ => {}
        }
        buf.clear();
    }

    Ok(())
}

fn add_record(document: &mut PackageDocument, record: RecordDescriptor) -> Result<(), ParseError> {
    if document.get_record(&record.name).is_some() {
        return Err(ParseError::duplicate("record", record.name));
    }
    document.records.push(record);
    Ok(())
}

/// Parses a record element and its fields.
fn parse_record(
    reader: &mut Reader<&[u8]>,
    e: &BytesStart<'_>,
    empty: bool,
) -> Result<RecordDescriptor, ParseError> {
    let element = element_name(e)?;
    if element != "record" {
        return Err(ParseError::unknown_element(element, "package"));
    }

    let name = required_attr(e, "record", "name")?;
    let mut record = RecordDescriptor {
        name,
        fields: Vec::new(),
    };
    if empty {
        return Ok(record);
    }

    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => {
                let tag_name = element_name(e)?;
                if tag_name != "field" {
                    return Err(ParseError::unknown_element(tag_name, "record"));
                }
                record.fields.push(parse_field(reader, e)?);
            }
            Ok(Event::Empty(ref e)) => {
                let tag_name = element_name(e)?;
                return Err(ParseError::structure(format!(
                    "<{tag_name}> in record '{}' has no type",
                    record.name
                )));
            }
            Ok(Event::End(_)) => break,
            Ok(Event::Eof) => return Err(ParseError::structure("unterminated record element")),
            Err(e) => return Err(ParseError::Xml(e)),
            _ => {}
        }
        buf.clear();
    }

    Ok(record)
}

/// Parses a field element.
fn parse_field(reader: &mut Reader<&[u8]>, e: &BytesStart<'_>) -> Result<FieldDescriptor, ParseError> {
    let mut name = None;
    let mut tag = None;

    for (key, value) in attributes(e)? {
        match key.as_str() {
            "name" => name = Some(value),
            "tag" => tag = Some(value),
            _ => {}
        }
    }

    let name = name.ok_or_else(|| ParseError::missing_attr("field", "name"))?;
    let ty = parse_single_type(reader, "field")?;

    Ok(FieldDescriptor { name, ty, tag })
}

/// Reads exactly one type element up to the enclosing end tag.
fn parse_single_type(
    reader: &mut Reader<&[u8]>,
    context: &str,
) -> Result<TypeDescriptor, ParseError> {
    let mut result: Option<TypeDescriptor> = None;
    let mut buf = Vec::new();

    loop {
        let parsed = match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => parse_type(reader, e, false)?,
            Ok(Event::Empty(ref e)) => parse_type(reader, e, true)?,
            Ok(Event::End(_)) => break,
            Ok(Event::Eof) => {
                return Err(ParseError::structure(format!("unterminated {context} element")));
            }
            Err(e) => return Err(ParseError::Xml(e)),
            _ => {
                buf.clear();
                continue;
            }
        };
        if result.replace(parsed).is_some() {
            return Err(ParseError::structure(format!(
                "{context} element must contain exactly one type"
            )));
        }
        buf.clear();
    }

    result.ok_or_else(|| ParseError::structure(format!("{context} element has no type")))
}

/// Parses a type element. Container elements consume their children and end tag.
fn parse_type(
    reader: &mut Reader<&[u8]>,
    e: &BytesStart<'_>,
    empty: bool,
) -> Result<TypeDescriptor, ParseError> {
    let element = element_name(e)?;

    let desc = match element.as_str() {
        "basic" => TypeDescriptor::Basic {
            name: required_attr(e, "basic", "name")?,
        },
        "named" => {
            let name = required_attr(e, "named", "name")?;
            let package = optional_attr(e, "package")?.map(|path| PackageDescriptor {
                path,
                name: None,
            });
            let package = match (package, optional_attr(e, "packageName")?) {
                (Some(mut p), Some(short)) => {
                    p.name = Some(short);
                    Some(p)
                }
                (package, _) => package,
            };
            TypeDescriptor::Named { package, name }
        }
        "typeParam" => TypeDescriptor::TypeParam {
            name: required_attr(e, "typeParam", "name")?,
        },
        "unsafePointer" => TypeDescriptor::UnsafePointer,
        "pointer" => {
            return Ok(TypeDescriptor::Pointer {
                elem: Box::new(container_elem(reader, "pointer", empty)?),
            });
        }
        "slice" => {
            return Ok(TypeDescriptor::Slice {
                elem: Box::new(container_elem(reader, "slice", empty)?),
            });
        }
        "array" => {
            let raw = required_attr(e, "array", "len")?;
            let len = raw
                .parse::<usize>()
                .map_err(|_| ParseError::invalid_attr("array", "len", raw.as_str()))?;
            return Ok(TypeDescriptor::Array {
                len,
                elem: Box::new(container_elem(reader, "array", empty)?),
            });
        }
        "chan" => {
            let dir = match optional_attr(e, "dir")? {
                Some(raw) => ChanDir::parse(&raw)
                    .ok_or_else(|| ParseError::invalid_attr("chan", "dir", raw.as_str()))?,
                None => ChanDir::Both,
            };
            return Ok(TypeDescriptor::Chan {
                dir,
                elem: Box::new(container_elem(reader, "chan", empty)?),
            });
        }
        "map" => {
            if empty {
                return Err(ParseError::structure("map element has no key and value"));
            }
            return parse_map(reader);
        }
        "func" => {
            let variadic = match optional_attr(e, "variadic")? {
                Some(raw) => parse_bool(&raw)
                    .ok_or_else(|| ParseError::invalid_attr("func", "variadic", raw.as_str()))?,
                None => false,
            };
            if empty {
                return Ok(TypeDescriptor::Func {
                    params: Vec::new(),
                    results: Vec::new(),
                    variadic,
                });
            }
            return parse_func(reader, variadic);
        }
        "interface" => {
            let methods = if empty {
                Vec::new()
            } else {
                parse_member_names(reader, "interface", "method")?
            };
            return Ok(TypeDescriptor::Interface { methods });
        }
        "struct" => {
            let fields = if empty {
                Vec::new()
            } else {
                parse_member_names(reader, "struct", "member")?
            };
            return Ok(TypeDescriptor::Struct { fields });
        }
        other => return Err(ParseError::unknown_element(other, "type")),
    };

    if !empty {
        skip_to_end(reader, &element)?;
    }

    Ok(desc)
}

fn container_elem(
    reader: &mut Reader<&[u8]>,
    element: &str,
    empty: bool,
) -> Result<TypeDescriptor, ParseError> {
    if empty {
        return Err(ParseError::structure(format!(
            "{element} element has no element type"
        )));
    }
    parse_single_type(reader, element)
}

/// Parses the `<key>` and `<value>` children of a map.
fn parse_map(reader: &mut Reader<&[u8]>) -> Result<TypeDescriptor, ParseError> {
    let mut key = None;
    let mut value = None;
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => {
                let tag_name = element_name(e)?;
                let slot = match tag_name.as_str() {
                    "key" => &mut key,
                    "value" => &mut value,
                    other => return Err(ParseError::unknown_element(other, "map")),
                };
                if slot.replace(parse_single_type(reader, &tag_name)?).is_some() {
                    return Err(ParseError::duplicate("map", tag_name));
                }
            }
            Ok(Event::Empty(ref e)) => {
                let tag_name = element_name(e)?;
                return Err(ParseError::structure(format!("map {tag_name} has no type")));
            }
            Ok(Event::End(_)) => break,
            Ok(Event::Eof) => return Err(ParseError::structure("unterminated map element")),
            Err(e) => return Err(ParseError::Xml(e)),
            _ => {}
        }
        buf.clear();
    }

    Ok(TypeDescriptor::Map {
        key: Box::new(key.ok_or_else(|| ParseError::structure("map element has no key"))?),
        value: Box::new(value.ok_or_else(|| ParseError::structure("map element has no value"))?),
    })
}

/// Parses the `<param>` and `<result>` children of a func.
fn parse_func(reader: &mut Reader<&[u8]>, variadic: bool) -> Result<TypeDescriptor, ParseError> {
    let mut params = Vec::new();
    let mut results = Vec::new();
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => {
                let tag_name = element_name(e)?;
                let name = optional_attr(e, "name")?;
                let list = match tag_name.as_str() {
                    "param" => &mut params,
                    "result" => &mut results,
                    other => return Err(ParseError::unknown_element(other, "func")),
                };
                list.push(ParamDescriptor {
                    name,
                    ty: parse_single_type(reader, &tag_name)?,
                });
            }
            Ok(Event::Empty(ref e)) => {
                let tag_name = element_name(e)?;
                return Err(ParseError::structure(format!("func {tag_name} has no type")));
            }
            Ok(Event::End(_)) => break,
            Ok(Event::Eof) => return Err(ParseError::structure("unterminated func element")),
            Err(e) => return Err(ParseError::Xml(e)),
            _ => {}
        }
        buf.clear();
    }

    Ok(TypeDescriptor::Func {
        params,
        results,
        variadic,
    })
}

/// Collects the `name` attribute of each `<member_tag>` child.
fn parse_member_names(
    reader: &mut Reader<&[u8]>,
    context: &str,
    member_tag: &str,
) -> Result<Vec<String>, ParseError> {
    let mut names = Vec::new();
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) | Ok(Event::Empty(ref e)) => {
                let tag_name = element_name(e)?;
                if tag_name != member_tag {
                    return Err(ParseError::unknown_element(tag_name, context));
                }
                names.push(required_attr(e, member_tag, "name")?);
            }
            Ok(Event::End(ref e)) => {
                if e.name().as_ref() != member_tag.as_bytes() {
                    break;
                }
            }
            Ok(Event::Eof) => {
                return Err(ParseError::structure(format!("unterminated {context} element")));
            }
            Err(e) => return Err(ParseError::Xml(e)),
            _ => {}
        }
        buf.clear();
    }

    Ok(names)
}

/// Consumes events up to the end tag of a leaf element.
fn skip_to_end(reader: &mut Reader<&[u8]>, element: &str) -> Result<(), ParseError> {
    let mut buf = Vec::new();
    let mut depth = 1;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(_)) => depth += 1,
            Ok(Event::End(_)) => {
                depth -= 1;
                if depth == 0 {
                    break;
                }
            }
            Ok(Event::Eof) => {
                return Err(ParseError::structure(format!("unterminated {element} element")));
            }
            Err(e) => return Err(ParseError::Xml(e)),
            _ => {}
        }
        buf.clear();
    }

    Ok(())
}

fn element_name(e: &BytesStart<'_>) -> Result<String, ParseError> {
    Ok(std::str::from_utf8(e.name().as_ref())?.to_string())
}

/// Returns all attributes of an element as unescaped key/value pairs.
fn attributes(e: &BytesStart<'_>) -> Result<Vec<(String, String)>, ParseError> {
    let mut result = Vec::new();

    for attr in e.attributes().flatten() {
        let key = std::str::from_utf8(attr.key.as_ref())?;
        let value = std::str::from_utf8(&attr.value)?;
        let value = quick_xml::escape::unescape(value)?;
        result.push((key.to_string(), value.into_owned()));
    }

    Ok(result)
}

fn optional_attr(e: &BytesStart<'_>, attribute: &str) -> Result<Option<String>, ParseError> {
    Ok(attributes(e)?
        .into_iter()
        .find_map(|(key, value)| (key == attribute).then_some(value)))
}

fn required_attr(e: &BytesStart<'_>, element: &str, attribute: &str) -> Result<String, ParseError> {
    optional_attr(e, attribute)?.ok_or_else(|| ParseError::missing_attr(element, attribute))
}

fn parse_bool(s: &str) -> Option<bool> {
    match s {
        "true" | "1" => Some(true),
        "false" | "0" => Some(false),
        _ => None,
    }
}
