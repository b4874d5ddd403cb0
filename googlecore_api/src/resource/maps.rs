//! Google Maps Platform web services.

use super::{ApiDefinition, ApiMethod, HttpMethod};

/// Geocoding, Places, Directions, Distance Matrix, Elevation and Time Zone
/// endpoints under `https://maps.googleapis.com/maps/api`.
pub static MAPS: ApiDefinition = ApiDefinition {
    name: "maps",
    base_url: "https://maps.googleapis.com/maps/api",
    methods: &[
        ApiMethod {
            name: "get_geocode",
            http_method: HttpMethod::Get,
            path: "/geocode/json",
            required_args: &["address"],
            optional_args: &["components", "bounds", "language", "region"],
            paginated: false,
            doc: "Convert an address into geographic coordinates.",
        },
        ApiMethod {
            name: "get_reverse_geocode",
            http_method: HttpMethod::Get,
            path: "/geocode/json",
            required_args: &["latlng"],
            optional_args: &["result_type", "location_type", "language"],
            paginated: false,
            doc: "Convert geographic coordinates into a human-readable address.",
        },
        ApiMethod {
            name: "get_nearby_search",
            http_method: HttpMethod::Get,
            path: "/place/nearbysearch/json",
            required_args: &["location"],
            optional_args: &[
                "radius", "keyword", "language", "minprice", "maxprice", "name", "opennow",
                "rankby", "type",
            ],
            paginated: true,
            doc: "Search for places within a specified area.",
        },
        ApiMethod {
            name: "get_text_search",
            http_method: HttpMethod::Get,
            path: "/place/textsearch/json",
            required_args: &["query"],
            optional_args: &[
                "location", "radius", "language", "minprice", "maxprice", "opennow", "type",
                "region",
            ],
            paginated: true,
            doc: "Search for places matching a text query.",
        },
        ApiMethod {
            name: "get_details",
            http_method: HttpMethod::Get,
            path: "/place/details/json",
            required_args: &["place_id"],
            optional_args: &["fields", "language", "region", "sessiontoken"],
            paginated: false,
            doc: "Fetch detailed information about a single place.",
        },
        ApiMethod {
            name: "get_directions",
            http_method: HttpMethod::Get,
            path: "/directions/json",
            required_args: &["origin", "destination"],
            optional_args: &[
                "mode", "waypoints", "alternatives", "avoid", "language", "units", "region",
                "departure_time", "arrival_time",
            ],
            paginated: false,
            doc: "Calculate directions between locations.",
        },
        ApiMethod {
            name: "get_distance_matrix",
            http_method: HttpMethod::Get,
            path: "/distancematrix/json",
            required_args: &["origins", "destinations"],
            optional_args: &[
                "mode", "avoid", "language", "units", "departure_time", "arrival_time",
            ],
            paginated: false,
            doc: "Compute travel distance and time for a matrix of origins and destinations.",
        },
        ApiMethod {
            name: "get_elevation",
            http_method: HttpMethod::Get,
            path: "/elevation/json",
            required_args: &["locations"],
            optional_args: &[],
            paginated: false,
            doc: "Look up elevation data for locations on the surface of the earth.",
        },
        ApiMethod {
            name: "get_timezone",
            http_method: HttpMethod::Get,
            path: "/timezone/json",
            required_args: &["location", "timestamp"],
            optional_args: &["language"],
            paginated: false,
            doc: "Look up the time zone for a location and timestamp.",
        },
    ],
};
