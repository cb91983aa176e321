use indexmap::IndexMap;

/// Position-ordered `(nice, code)` labels of a delimited gateway response.
pub const RESPONSE_LABELS: [(&str, &str); 40] = [
    ("Response Code", "response_code"),
    ("Response Subcode", "response_subcode"),
    ("Response Reason Code", "response_reason_code"),
    ("Response Reason Text", "response_reason_text"),
    ("Approval Code", "approval_code"),
    ("AVS Result Code", "avs_result_code"),
    ("Transaction ID", "transaction_id"),
    ("Invoice Number", "invoice_number"),
    ("Description", "description"),
    ("Amount", "amount"),
    ("Method", "method"),
    ("Transaction Type", "transaction_type"),
    ("Customer ID", "customer_id"),
    ("Cardholder First Name", "cardholder_first_name"),
    ("Cardholder Last Name", "cardholder_last_name"),
    ("Company", "company"),
    ("Billing Address", "billing_address"),
    ("City", "city"),
    ("State", "state"),
    ("Zip", "zip"),
    ("Country", "country"),
    ("Phone", "phone"),
    ("Fax", "fax"),
    ("Email", "email"),
    ("Ship to First Name", "shipto_first_name"),
    ("Ship to Last Name", "shipto_last_name"),
    ("Ship to Company", "shipto_company"),
    ("Ship to Address", "shipto_address"),
    ("Ship to City", "shipto_city"),
    ("Ship to State", "shipto_state"),
    ("Ship to Zip", "shipto_zip"),
    ("Ship to Country", "shipto_country"),
    ("Tax Amount", "tax_amount"),
    ("Duty Amount", "duty_amount"),
    ("Freight Amount", "freight_amount"),
    ("Tax Exempt Flag", "tax_exempt_flag"),
    ("PO Number", "po_number"),
    ("MD5 Hash", "hash"),
    (
        "Card Code (CVV2/CVC2/CID) Response Code",
        "cvv_response_code",
    ),
    (
        "Cardholder Authentication Verification Value (CAVV) Response Code",
        "cavv_response_code",
    ),
];

/// Named positions of the delimited response that callers commonly read.
///
/// The discriminant is the position in the raw response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseField {
    ResponseCode = 0,
    ResponseSubcode = 1,
    ResponseReasonCode = 2,
    ResponseReasonText = 3,
    ApprovalCode = 4,
    AvsResultCode = 5,
    TransactionId = 6,
    InvoiceNumber = 7,
    Description = 8,
    Amount = 9,
    Method = 10,
    TransactionType = 11,
    CustomerId = 12,
    Hash = 37,
    CvvResponseCode = 38,
    CavvResponseCode = 39,
}

impl ResponseField {
    pub fn position(self) -> usize {
        self as usize
    }

    pub fn nice_label(self) -> &'static str {
        RESPONSE_LABELS[self.position()].0
    }

    pub fn code_label(self) -> &'static str {
        RESPONSE_LABELS[self.position()].1
    }
}

/// A positional gateway response: values whose meaning depends only on their index.
///
/// # Examples
///
/// ```
/// use authorizenet::core::response::{PositionalResponse, ResponseField};
///
/// let response = PositionalResponse::from_delimited("1|1|1|(TESTMODE) approved", '|');
///
/// assert!(response.is_approved());
/// assert_eq!(response.get(ResponseField::ResponseReasonText), "(TESTMODE) approved");
/// assert_eq!(response.decode_nice().len(), 4);
/// assert_eq!(response.decode_code()["response_code"], "1");
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PositionalResponse {
    raw: Vec<String>,
}

impl PositionalResponse {
    pub fn new(raw: Vec<String>) -> Self {
        Self { raw }
    }

    /// Splits a delimited body; an empty body gives an empty response.
    pub fn from_delimited(body: &str, delimiter: char) -> Self {
        if body.is_empty() {
            return Self::default();
        }
        Self::new(body.split(delimiter).map(str::to_string).collect())
    }

    pub fn raw(&self) -> &[String] {
        &self.raw
    }

    pub fn len(&self) -> usize {
        self.raw.len()
    }

    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Raw value at `position`, `None` past the end.
    pub fn at(&self, position: usize) -> Option<&str> {
        self.raw.get(position).map(String::as_str)
    }

    /// Value of a named field, `""` when the gateway did not send it.
    pub fn get(&self, field: ResponseField) -> &str {
        self.at(field.position()).unwrap_or("")
    }

    /// `true` only when the first field is exactly `"1"`.
    pub fn is_approved(&self) -> bool {
        self.at(0) == Some("1")
    }

    /// Keys the raw values by human readable labels.
    ///
    /// Positions beyond the label list are not exposed; read them through
    /// [`PositionalResponse::raw`].
    pub fn decode_nice(&self) -> IndexMap<String, String> {
        self.raw
            .iter()
            .zip(RESPONSE_LABELS.iter())
            .map(|(value, (nice, _))| (nice.to_string(), value.clone()))
            .collect()
    }

    /// Keys the raw values by snake_case labels.
    ///
    /// Positions beyond the label list are keyed by their index.
    pub fn decode_code(&self) -> IndexMap<String, String> {
        self.raw
            .iter()
            .enumerate()
            .map(|(position, value)| {
                let key = RESPONSE_LABELS
                    .get(position)
                    .map(|(_, code)| code.to_string())
                    .unwrap_or_else(|| position.to_string());
                (key, value.clone())
            })
            .collect()
    }
}
