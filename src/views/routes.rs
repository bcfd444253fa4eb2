//! Client-visible routes

use std::fmt;
use url::Url;

/// A screen of the registration client
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Landing,
    CreateEvent,
    Event { event_id: String },
    Register { event_id: String },
    EditGroup { event_id: String, group_id: Option<i64> },
}

impl Route {
    /// Resolve a path such as `/event/abc/edit?groupId=4`; unknown paths yield `None`
    pub fn parse(path: &str) -> Option<Self> {
        let url = Url::parse("http://localhost/").ok()?.join(path).ok()?;

        let segments: Vec<String> = url
            .path_segments()
            .map(|segments| {
                segments
                    .filter(|s| !s.is_empty())
                    .map(|s| urlencoding::decode(s).map(|d| d.into_owned()).unwrap_or_else(|_| s.to_string()))
                    .collect()
            })
            .unwrap_or_default();

        match segments.iter().map(String::as_str).collect::<Vec<_>>().as_slice() {
            [] => Some(Route::Landing),
            ["create"] => Some(Route::CreateEvent),
            ["event", id] => Some(Route::Event { event_id: id.to_string() }),
            ["event", id, "register"] => Some(Route::Register { event_id: id.to_string() }),
            ["event", id, "edit"] => {
                let group_id = url
                    .query_pairs()
                    .find(|(key, _)| key == "groupId")
                    .and_then(|(_, value)| value.parse::<i64>().ok());
                Some(Route::EditGroup { event_id: id.to_string(), group_id })
            }
            _ => None,
        }
    }

    /// Event the route belongs to, if any
    pub fn event_id(&self) -> Option<&str> {
        match self {
            Route::Event { event_id }
            | Route::Register { event_id }
            | Route::EditGroup { event_id, .. } => Some(event_id),
            Route::Landing | Route::CreateEvent => None,
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Route::Landing => write!(f, "/"),
            Route::CreateEvent => write!(f, "/create"),
            Route::Event { event_id } => write!(f, "/event/{}", urlencoding::encode(event_id)),
            Route::Register { event_id } => {
                write!(f, "/event/{}/register", urlencoding::encode(event_id))
            }
            Route::EditGroup { event_id, group_id } => {
                write!(f, "/event/{}/edit", urlencoding::encode(event_id))?;
                if let Some(group_id) = group_id {
                    write!(f, "?groupId={}", group_id)?;
                }
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_routes() {
        assert_eq!(Route::parse("/"), Some(Route::Landing));
        assert_eq!(Route::parse("/create"), Some(Route::CreateEvent));
        assert_eq!(
            Route::parse("/event/abc"),
            Some(Route::Event { event_id: "abc".to_string() })
        );
        assert_eq!(
            Route::parse("/event/abc/register/"),
            Some(Route::Register { event_id: "abc".to_string() })
        );
    }

    #[test]
    fn test_parse_edit_route_query() {
        assert_eq!(
            Route::parse("/event/abc/edit?groupId=12"),
            Some(Route::EditGroup { event_id: "abc".to_string(), group_id: Some(12) })
        );
        assert_eq!(
            Route::parse("/event/abc/edit?groupId=twelve"),
            Some(Route::EditGroup { event_id: "abc".to_string(), group_id: None })
        );
    }

    #[test]
    fn test_unknown_route() {
        assert_eq!(Route::parse("/events"), None);
        assert_eq!(Route::parse("/event/abc/delete"), None);
    }

    #[test]
    fn test_display_round_trips_through_parse() {
        let route = Route::EditGroup { event_id: "a b".to_string(), group_id: Some(3) };
        assert_eq!(route.to_string(), "/event/a%20b/edit?groupId=3");
        assert_eq!(Route::parse(&route.to_string()), Some(route));
    }
}
