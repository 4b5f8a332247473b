//! Common test utilities and fixtures for integration tests
//!
//! Response bodies follow the examples in Kraken's REST API reference.

#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use kraken_rest::{
    ClientConfig, Credentials, HttpRequest, HttpResponse, HttpTransport, KrakenRestClient,
    RestError, RestResult,
};
use parking_lot::Mutex;

/// API key used by private test clients
pub const API_KEY: &str = "TEST_API_KEY";

/// Base64 secret used by private test clients
pub const SECRET: &str =
    "kQH5HW/8p1uGOVjbgWA7FunAmGO8lsSUXNsu3eow76sz84Q18fWxnyRzBHCd3pd5nE9qa99HAZtuZuj6F1huXg==";

pub const BASE_URL: &str = "https://api.kraken.com";

pub const SERVER_TIME: &str = r#"{
    "error": [],
    "result": {"unixtime": 1501271914, "rfc1123": "Fri, 28 Jul 17 19:58:34 +0000"}
}"#;

pub const SYSTEM_STATUS: &str = r#"{
    "error": [],
    "result": {"status": "online", "timestamp": "2023-07-06T18:52:00Z"}
}"#;

pub const ASSETS: &str = r#"{
    "error": [],
    "result": {
        "XXBT": {"aclass": "currency", "altname": "XBT", "decimals": 10, "display_decimals": 5, "collateral_value": 1, "status": "enabled"},
        "ZUSD": {"aclass": "currency", "altname": "USD", "decimals": 4, "display_decimals": 2, "status": "enabled"}
    }
}"#;

pub const ASSET_PAIRS: &str = r#"{
    "error": [],
    "result": {
        "XXBTZUSD": {
            "altname": "XBTUSD", "wsname": "XBT/USD",
            "aclass_base": "currency", "base": "XXBT",
            "aclass_quote": "currency", "quote": "ZUSD",
            "lot": "unit", "cost_decimals": 5, "pair_decimals": 1,
            "lot_decimals": 8, "lot_multiplier": 1,
            "leverage_buy": [2, 3, 4, 5], "leverage_sell": [2, 3, 4, 5],
            "fees": [[0, 0.26], [50000, 0.24]],
            "fees_maker": [[0, 0.16], [50000, 0.14]],
            "fee_volume_currency": "ZUSD",
            "margin_call": 80, "margin_stop": 40,
            "ordermin": "0.0001", "costmin": "0.5", "tick_size": "0.1",
            "status": "online"
        }
    }
}"#;

pub const TICKER: &str = r#"{
    "error": [],
    "result": {
        "XXBTZUSD": {
            "a": ["30300.10000", "1", "1.000"],
            "b": ["30300.00000", "1", "1.000"],
            "c": ["30303.20000", "0.00067643"],
            "v": ["4083.67001100", "4412.73601799"],
            "p": ["30706.77771", "30689.13205"],
            "t": [34619, 38907],
            "l": ["29868.30000", "29868.30000"],
            "h": ["31631.00000", "31631.00000"],
            "o": "30502.80000"
        }
    }
}"#;

pub const OHLC: &str = r#"{
    "error": [],
    "result": {
        "XXBTZUSD": [
            [1688671200, "30306.1", "30306.2", "30305.7", "30305.7", "30306.1", "3.39243896", 23],
            [1688671260, "30304.5", "30304.5", "30300.0", "30300.0", "30300.7", "4.42996871", 18]
        ],
        "last": 1688672160
    }
}"#;

pub const DEPTH: &str = r#"{
    "error": [],
    "result": {
        "XXBTZUSD": {
            "asks": [["30384.10000", "2.059", 1688671659], ["30387.90000", "1.500", 1688671380]],
            "bids": [["30297.00000", "1.115", 1688671636], ["30296.70000", "2.002", 1688671674]]
        }
    }
}"#;

pub const TRADES: &str = r#"{
    "error": [],
    "result": {
        "XXBTZUSD": [
            ["30243.40000", "0.34507674", 1688669597.8277, "b", "m", "", 61044952],
            ["30243.30000", "0.00376960", 1688669598.2804, "s", "l", "", 61044953]
        ],
        "last": "1688671969993150842"
    }
}"#;

pub const SPREAD: &str = r#"{
    "error": [],
    "result": {
        "XXBTZUSD": [
            [1688671834, "30292.10000", "30297.50000"],
            [1688671834, "30292.10000", "30296.70000"]
        ],
        "last": 1688672106
    }
}"#;

pub const BALANCE: &str = r#"{
    "error": [],
    "result": {"ZUSD": "171288.6158", "ZEUR": "504861.8946", "XXBT": "1011.1908877900", "XETH": "0.0000000000"}
}"#;

pub const TRADE_BALANCE: &str = r#"{
    "error": [],
    "result": {
        "eb": "1101.3425", "tb": "392.2264", "m": "7.0354", "n": "-10.0232",
        "c": "21.1063", "v": "31.1297", "e": "382.2032", "mf": "375.1678", "ml": "5432.57"
    }
}"#;

pub const OPEN_ORDERS: &str = r#"{
    "error": [],
    "result": {
        "open": {
            "OQCLML-BW3P3-BUCMWZ": {
                "refid": null, "userref": 0, "status": "open",
                "opentm": 1688666559.8974, "starttm": 0, "expiretm": 0,
                "descr": {
                    "pair": "XBTUSD", "type": "buy", "ordertype": "limit",
                    "price": "30010.0", "price2": "0", "leverage": "none",
                    "order": "buy 1.25000000 XBTUSD @ limit 30010.0", "close": ""
                },
                "vol": "1.25000000", "vol_exec": "0.37500000", "cost": "11253.7",
                "fee": "0.00000", "price": "30010.0", "stopprice": "0.00000",
                "limitprice": "0.00000", "misc": "", "oflags": "fciq",
                "trades": ["TCCCTY-WE2O6-P3NB37"]
            }
        }
    }
}"#;

pub const CLOSED_ORDERS: &str = r#"{
    "error": [],
    "result": {
        "closed": {
            "O37652-RJWRT-IMO74O": {
                "refid": null, "userref": 1, "status": "canceled", "reason": "User requested",
                "opentm": 1688148493.7708, "closetm": 1688148610.0482,
                "starttm": 0, "expiretm": 0,
                "descr": {
                    "pair": "XBTGBP", "type": "buy", "ordertype": "stop-loss-limit",
                    "price": "23667.0", "price2": "0", "leverage": "none",
                    "order": "buy 0.00100000 XBTGBP @ limit 23667.0", "close": ""
                },
                "vol": "0.00100000", "vol_exec": "0.00000000", "cost": "0.00000",
                "fee": "0.00000", "price": "0.00000", "misc": "", "oflags": "fciq"
            }
        },
        "count": 2
    }
}"#;

pub const TRADES_HISTORY: &str = r#"{
    "error": [],
    "result": {
        "trades": {
            "THVRQM-33VKH-UCI7BS": {
                "ordertxid": "OQCLML-BW3P3-BUCMWZ", "postxid": "TKH2SE-M7IF5-CFI7LT",
                "pair": "XXBTZUSD", "time": 1688667796.8802, "type": "buy",
                "ordertype": "limit", "price": "30010.00000", "cost": "600.20000",
                "fee": "0.00000", "vol": "0.02000000", "margin": "0.00000",
                "misc": "", "trade_id": 40274859, "maker": true
            }
        },
        "count": 2346
    }
}"#;

pub const OPEN_POSITIONS: &str = r#"{
    "error": [],
    "result": {
        "TF5GVO-T7ZZ2-6NBKBI": {
            "ordertxid": "OLWNFG-LLH4R-D6SFFP", "posstatus": "open", "pair": "XXBTZUSD",
            "time": 1605280097.8294, "type": "buy", "ordertype": "limit",
            "cost": "104610.52842", "fee": "289.06565", "vol": "8.82412861",
            "vol_closed": "0.20200000", "margin": "20922.10568", "value": "258797.5",
            "net": "154186.9728", "terms": "0.0100% per 4 hours",
            "rollovertm": "1616672637", "misc": "", "oflags": ""
        }
    }
}"#;

pub const LEDGERS: &str = r#"{
    "error": [],
    "result": {
        "ledger": {
            "L4UESK-KG3EQ-UFO4T5": {
                "refid": "TJKLXX-PGMUI-4NTLXU", "time": 1688464484.1787,
                "type": "trade", "subtype": "", "aclass": "currency", "asset": "ZGBP",
                "amount": "-24.5000", "fee": "0.0490", "balance": "459567.9171"
            }
        },
        "count": 1
    }
}"#;

pub const TRADE_VOLUME: &str = r#"{
    "error": [],
    "result": {
        "currency": "ZUSD",
        "volume": "200709587.4223",
        "fees": {
            "XXBTZUSD": {
                "fee": "0.1000", "minfee": "0.1000", "maxfee": "0.2600",
                "nextfee": null, "nextvolume": null, "tiervolume": "10000000.0000"
            }
        },
        "fees_maker": {
            "XXBTZUSD": {
                "fee": "0.0000", "minfee": "0.0000", "maxfee": "0.1600",
                "nextfee": null, "nextvolume": null, "tiervolume": "10000000.0000"
            }
        }
    }
}"#;

pub const WEBSOCKETS_TOKEN: &str = r#"{
    "error": [],
    "result": {"token": "1Dwc4lzSwNWOAwkMdqhssNNFhs1ed606d1WcF3XfEMw", "expires": 900}
}"#;

pub const ADD_ORDER: &str = r#"{
    "error": [],
    "result": {
        "descr": {"order": "buy 1.25000000 XBTUSD @ limit 27500.0"},
        "txid": ["OU22CG-KLAF2-FWUDD7"]
    }
}"#;

pub const CANCEL_ORDER: &str = r#"{"error": [], "result": {"count": 1}}"#;

pub const CANCEL_ALL: &str = r#"{"error": [], "result": {"count": 4}}"#;

pub const DEPOSIT_METHODS: &str = r#"{
    "error": [],
    "result": [
        {"method": "Bitcoin", "limit": false, "fee": "0.0000000000", "gen-address": true, "minimum": "0.00010000"},
        {"method": "Bitcoin Lightning", "limit": "0.50000000", "fee": "0.00000000", "minimum": "0.00001000"}
    ]
}"#;

pub const DEPOSIT_ADDRESSES: &str = r#"{
    "error": [],
    "result": [
        {"address": "2N9fRkx5JTWXWHmXzZtvhQsufvoYRMq9ExV", "expiretm": "0", "new": true},
        {"address": "2NCpXUCEYr8ur9WXM1tAjZSem2w3aQeTcAo", "expiretm": "0", "new": true}
    ]
}"#;

pub const DEPOSIT_STATUS: &str = r#"{
    "error": [],
    "result": [
        {
            "method": "Bitcoin", "aclass": "currency", "asset": "XXBT",
            "refid": "FTQcuak-V6Za8qrWnhzTx67yYHz8Tg",
            "txid": "6544b41b607d8b2512baf801755a3a87b6890eacdb451be8a94059fb11f0a8d9",
            "info": "2Myd4eaAW96ojk38A2uDK4FbioCayvkEgVq",
            "amount": "0.78125000", "fee": "0.0000000000", "time": 1688992722,
            "status": "Success", "status-prop": "return"
        }
    ]
}"#;

pub const WITHDRAW_INFO: &str = r#"{
    "error": [],
    "result": {"method": "Bitcoin", "limit": "332.00956139", "amount": "0.72485000", "fee": "0.00015000"}
}"#;

pub const WITHDRAW: &str = r#"{"error": [], "result": {"refid": "FTQcuak-V6Za8qrWnhzTx67yYHz8Tg"}}"#;

pub const WITHDRAW_CANCEL: &str = r#"{"error": [], "result": true}"#;

pub const INVALID_ARGUMENTS: &str = r#"{"error": ["EGeneral:Invalid arguments"]}"#;

pub const MULTI_ERROR: &str =
    r#"{"error": ["EGeneral:Invalid arguments", "EService:Unavailable"], "result": {}}"#;

type Responder = dyn Fn(&HttpRequest) -> RestResult<HttpResponse> + Send + Sync;

/// Transport that records every request and answers from a closure
pub struct MockTransport {
    requests: Mutex<Vec<HttpRequest>>,
    responder: Box<Responder>,
}

impl MockTransport {
    /// Answer every request with `responder`
    pub fn new(
        responder: impl Fn(&HttpRequest) -> RestResult<HttpResponse> + Send + Sync + 'static,
    ) -> Arc<Self> {
        Arc::new(Self {
            requests: Mutex::new(Vec::new()),
            responder: Box::new(responder),
        })
    }

    /// Answer every request with 200 and `body`
    pub fn ok(body: &'static str) -> Arc<Self> {
        Self::status(200, body)
    }

    /// Answer every request with `status` and `body`
    pub fn status(status: u16, body: &'static str) -> Arc<Self> {
        Self::new(move |_| Ok(response(status, body)))
    }

    /// Fail every request at the transport level
    pub fn failing(message: &'static str) -> Arc<Self> {
        Self::new(move |_| Err(RestError::Transport(message.to_string())))
    }

    /// Answer by URL path; unknown paths get `EGeneral:Unknown method`
    pub fn routes(routes: &[(&'static str, &'static str)]) -> Arc<Self> {
        let routes = routes.to_vec();
        Self::new(move |request| {
            let path = request_path(request);
            let body = routes
                .iter()
                .find(|(route, _)| *route == path)
                .map(|(_, body)| *body)
                .unwrap_or(r#"{"error": ["EGeneral:Unknown method"]}"#);
            Ok(response(200, body))
        })
    }

    /// Every request sent so far, in send order
    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().clone()
    }

    /// The most recent request
    pub fn last_request(&self) -> HttpRequest {
        self.requests
            .lock()
            .last()
            .cloned()
            .expect("no request was sent")
    }
}

#[async_trait]
impl HttpTransport for MockTransport {
    async fn send(&self, request: HttpRequest) -> RestResult<HttpResponse> {
        let result = (self.responder)(&request);
        self.requests.lock().push(request);
        // Let other tasks run while this request is "in flight"
        tokio::task::yield_now().await;
        result
    }
}

pub fn response(status: u16, body: &str) -> HttpResponse {
    HttpResponse {
        status,
        body: body.as_bytes().to_vec(),
    }
}

/// Path portion of a request URL, without the query string
pub fn request_path(request: &HttpRequest) -> &str {
    let without_host = request.url.strip_prefix(BASE_URL).unwrap_or(&request.url);
    without_host.split('?').next().unwrap_or(without_host)
}

/// Query string of a request URL, if any
pub fn request_query(request: &HttpRequest) -> Option<&str> {
    request.url.split_once('?').map(|(_, query)| query)
}

/// Decoded form fields of a request body
pub fn form_fields(request: &HttpRequest) -> Vec<(String, String)> {
    let body = request.body.as_deref().unwrap_or_default();
    serde_urlencoded::from_str(body).expect("body is not form encoded")
}

/// Value of one form field
pub fn form_field(request: &HttpRequest, key: &str) -> Option<String> {
    form_fields(request)
        .into_iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v)
}

/// Nonce carried by a private request
pub fn nonce_of(request: &HttpRequest) -> u64 {
    form_field(request, "nonce")
        .expect("request has no nonce")
        .parse()
        .expect("nonce is not an integer")
}

pub fn credentials() -> Credentials {
    Credentials::new(API_KEY, SECRET).expect("test credentials are valid")
}

pub fn public_client(transport: Arc<MockTransport>) -> KrakenRestClient {
    KrakenRestClient::with_transport(ClientConfig::new(), transport)
}

pub fn private_client(transport: Arc<MockTransport>) -> KrakenRestClient {
    KrakenRestClient::with_transport(ClientConfig::new().with_credentials(credentials()), transport)
}
