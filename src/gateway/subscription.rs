use chrono::NaiveDate;
use std::fmt;

use crate::core::fields::FieldSet;
use crate::error::GatewayError;
use crate::xml::{XmlNode, XmlTreeWriterBuilder};

/// Schema namespace carried by the root element of every recurring billing request.
pub const ARB_NAMESPACE: &str = "AnetApi/xml/v1/schema/AnetApiSchema.xsd";

/// Which recurring billing request a subscription transaction sends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubscriptionMode {
    Create,
    Update,
    Cancel,
}

impl SubscriptionMode {
    /// Mode implied by a field set: a subscription id selects an update.
    pub fn from_fields(fields: &FieldSet) -> Self {
        if fields.is_filled("x_subsc_id") {
            SubscriptionMode::Update
        } else {
            SubscriptionMode::Create
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SubscriptionMode::Create => "create",
            SubscriptionMode::Update => "update",
            SubscriptionMode::Cancel => "cancel",
        }
    }
}

impl fmt::Display for SubscriptionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MerchantAuthentication {
    pub name: String,
    pub transaction_key: String,
}

impl MerchantAuthentication {
    fn from_fields(fields: &FieldSet) -> Self {
        Self {
            name: fields.get("x_login").to_string(),
            transaction_key: fields.get("x_tran_key").to_string(),
        }
    }

    fn to_node(&self) -> XmlNode {
        XmlNode::named([
            ("name", XmlNode::from(&self.name)),
            ("transactionKey", XmlNode::from(&self.transaction_key)),
        ])
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PaymentSchedule {
    pub interval_length: String,
    pub interval_unit: String,
    pub start_date: String,
    pub total_occurrences: String,
    pub trial_occurrences: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CreditCard {
    pub card_number: String,
    pub expiration_date: String,
}

impl CreditCard {
    fn to_node(&self) -> XmlNode {
        XmlNode::named([(
            "creditCard",
            XmlNode::named([
                ("cardNumber", XmlNode::from(&self.card_number)),
                ("expirationDate", XmlNode::from(&self.expiration_date)),
            ]),
        )])
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BillTo {
    pub first_name: String,
    pub last_name: String,
}

/// `ARBCreateSubscriptionRequest` content.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateSubscription {
    pub authentication: MerchantAuthentication,
    pub ref_id: String,
    pub name: String,
    pub schedule: PaymentSchedule,
    pub amount: String,
    pub trial_amount: String,
    pub credit_card: CreditCard,
    pub bill_to: BillTo,
}

/// `ARBUpdateSubscriptionRequest` content; only provided values are sent.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateSubscription {
    pub authentication: MerchantAuthentication,
    pub ref_id: String,
    pub subscription_id: String,
    pub amount: Option<String>,
    pub credit_card: Option<CreditCard>,
}

/// `ARBCancelSubscriptionRequest` content.
#[derive(Debug, Clone, PartialEq)]
pub struct CancelSubscription {
    pub authentication: MerchantAuthentication,
    pub ref_id: String,
    pub subscription_id: String,
}

/// A recurring billing request, one variant per mode.
#[derive(Debug, Clone, PartialEq)]
pub enum SubscriptionRequest {
    Create(CreateSubscription),
    Update(UpdateSubscription),
    Cancel(CancelSubscription),
}

impl SubscriptionRequest {
    /// Picks the fields `mode` uses out of a field set.
    pub fn from_fields(mode: SubscriptionMode, fields: &FieldSet) -> Self {
        let authentication = MerchantAuthentication::from_fields(fields);
        let ref_id = fields.get("x_ref_id").to_string();

        match mode {
            SubscriptionMode::Create => SubscriptionRequest::Create(CreateSubscription {
                authentication,
                ref_id,
                name: fields.get("x_subsc_name").to_string(),
                schedule: PaymentSchedule {
                    interval_length: fields.get("x_length").to_string(),
                    interval_unit: fields.get("x_unit").to_string(),
                    start_date: fields.get("x_start_date").to_string(),
                    total_occurrences: fields.get("x_total_occurrences").to_string(),
                    trial_occurrences: fields.get("x_trial_occurrences").to_string(),
                },
                amount: fields.get("x_amount").to_string(),
                trial_amount: fields.get("x_trial_amount").to_string(),
                credit_card: CreditCard {
                    card_number: fields.get("x_card_num").to_string(),
                    expiration_date: fields.get("x_exp_date").to_string(),
                },
                bill_to: BillTo {
                    first_name: fields.get("x_first_name").to_string(),
                    last_name: fields.get("x_last_name").to_string(),
                },
            }),
            SubscriptionMode::Update => {
                let amount = fields
                    .is_filled("x_amount")
                    .then(|| fields.get("x_amount").to_string());
                let credit_card = (fields.is_filled("x_card_num")
                    && fields.is_filled("x_exp_date"))
                .then(|| CreditCard {
                    card_number: fields.get("x_card_num").to_string(),
                    expiration_date: fields.get("x_exp_date").to_string(),
                });

                SubscriptionRequest::Update(UpdateSubscription {
                    authentication,
                    ref_id,
                    subscription_id: fields.get("x_subsc_id").to_string(),
                    amount,
                    credit_card,
                })
            }
            SubscriptionMode::Cancel => SubscriptionRequest::Cancel(CancelSubscription {
                authentication,
                ref_id,
                subscription_id: fields.get("x_subsc_id").to_string(),
            }),
        }
    }

    pub fn mode(&self) -> SubscriptionMode {
        match self {
            SubscriptionRequest::Create(_) => SubscriptionMode::Create,
            SubscriptionRequest::Update(_) => SubscriptionMode::Update,
            SubscriptionRequest::Cancel(_) => SubscriptionMode::Cancel,
        }
    }

    pub fn root_element(&self) -> &'static str {
        match self {
            SubscriptionRequest::Create(_) => "ARBCreateSubscriptionRequest",
            SubscriptionRequest::Update(_) => "ARBUpdateSubscriptionRequest",
            SubscriptionRequest::Cancel(_) => "ARBCancelSubscriptionRequest",
        }
    }

    /// Structured content of the request, without the root element.
    pub fn to_node(&self) -> XmlNode {
        match self {
            SubscriptionRequest::Create(request) => XmlNode::named([
                ("merchantAuthentication", request.authentication.to_node()),
                ("refId", XmlNode::from(&request.ref_id)),
                (
                    "subscription",
                    XmlNode::named([
                        ("name", XmlNode::from(&request.name)),
                        (
                            "paymentSchedule",
                            XmlNode::named([
                                (
                                    "interval",
                                    XmlNode::named([
                                        (
                                            "length",
                                            XmlNode::from(&request.schedule.interval_length),
                                        ),
                                        ("unit", XmlNode::from(&request.schedule.interval_unit)),
                                    ]),
                                ),
                                ("startDate", XmlNode::from(&request.schedule.start_date)),
                                (
                                    "totalOccurrences",
                                    XmlNode::from(&request.schedule.total_occurrences),
                                ),
                                (
                                    "trialOccurrences",
                                    XmlNode::from(&request.schedule.trial_occurrences),
                                ),
                            ]),
                        ),
                        ("amount", XmlNode::from(&request.amount)),
                        ("trialAmount", XmlNode::from(&request.trial_amount)),
                        ("payment", request.credit_card.to_node()),
                        (
                            "billTo",
                            XmlNode::named([
                                ("firstName", XmlNode::from(&request.bill_to.first_name)),
                                ("lastName", XmlNode::from(&request.bill_to.last_name)),
                            ]),
                        ),
                    ]),
                ),
            ]),
            SubscriptionRequest::Update(request) => {
                let mut subscription = XmlNode::empty();
                if let Some(amount) = &request.amount {
                    subscription.insert("amount", XmlNode::from(amount));
                }
                if let Some(card) = &request.credit_card {
                    subscription.insert("payment", card.to_node());
                }

                XmlNode::named([
                    ("merchantAuthentication", request.authentication.to_node()),
                    ("refId", XmlNode::from(&request.ref_id)),
                    ("subscriptionId", XmlNode::from(&request.subscription_id)),
                    ("subscription", subscription),
                ])
            }
            SubscriptionRequest::Cancel(request) => XmlNode::named([
                ("merchantAuthentication", request.authentication.to_node()),
                ("refId", XmlNode::from(&request.ref_id)),
                ("subscriptionId", XmlNode::from(&request.subscription_id)),
            ]),
        }
    }

    /// Renders the namespaced XML request body.
    pub fn to_xml(&self) -> Result<String, GatewayError> {
        XmlTreeWriterBuilder::new()
            .root_attribute("xmlns", ARB_NAMESPACE)
            .build()
            .serialize(&self.to_node(), self.root_element())
    }
}

/// Billing interval unit of a subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntervalUnit {
    Days,
    Months,
}

impl IntervalUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            IntervalUnit::Days => "days",
            IntervalUnit::Months => "months",
        }
    }
}

/// Typed construction of the recurring billing field set.
///
/// # Examples
///
/// ```
/// use authorizenet::gateway::subscription::{IntervalUnit, SubscriptionFieldsBuilder};
/// use chrono::NaiveDate;
///
/// let fields = SubscriptionFieldsBuilder::new()
///     .name("Monthly box")
///     .interval(1, IntervalUnit::Months)
///     .start_date(NaiveDate::from_ymd_opt(2026, 11, 1).unwrap())
///     .total_occurrences(12)
///     .amount("19.99")
///     .build();
///
/// assert_eq!(fields.get("x_unit"), "months");
/// assert_eq!(fields.get("x_start_date"), "2026-11-01");
/// assert_eq!(fields.get("x_total_occurrences"), "12");
/// ```
#[derive(Debug, Default)]
pub struct SubscriptionFieldsBuilder {
    fields: FieldSet,
}

impl SubscriptionFieldsBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ref_id<S: Into<String>>(mut self, ref_id: S) -> Self {
        self.fields.set("x_ref_id", ref_id);
        self
    }

    /// Targets an existing subscription, which makes the transaction an update.
    pub fn subscription_id<S: Into<String>>(mut self, id: S) -> Self {
        self.fields.set("x_subsc_id", id);
        self
    }

    pub fn name<S: Into<String>>(mut self, name: S) -> Self {
        self.fields.set("x_subsc_name", name);
        self
    }

    pub fn interval(mut self, length: u16, unit: IntervalUnit) -> Self {
        self.fields.set("x_length", length.to_string());
        self.fields.set("x_unit", unit.as_str());
        self
    }

    pub fn start_date(mut self, date: NaiveDate) -> Self {
        self.fields.set("x_start_date", date.format("%Y-%m-%d").to_string());
        self
    }

    pub fn total_occurrences(mut self, count: u16) -> Self {
        self.fields.set("x_total_occurrences", count.to_string());
        self
    }

    pub fn trial_occurrences(mut self, count: u16) -> Self {
        self.fields.set("x_trial_occurrences", count.to_string());
        self
    }

    /// Sets the amount billed per occurrence, as the gateway formats it (`"19.99"`).
    pub fn amount<S: Into<String>>(mut self, amount: S) -> Self {
        self.fields.set("x_amount", amount);
        self
    }

    pub fn trial_amount<S: Into<String>>(mut self, amount: S) -> Self {
        self.fields.set("x_trial_amount", amount);
        self
    }

    /// Sets the card number and its `YYYY-MM` expiration date.
    pub fn credit_card<N, E>(mut self, number: N, expiration: E) -> Self
    where
        N: Into<String>,
        E: Into<String>,
    {
        self.fields.set("x_card_num", number);
        self.fields.set("x_exp_date", expiration);
        self
    }

    pub fn bill_to<F, L>(mut self, first_name: F, last_name: L) -> Self
    where
        F: Into<String>,
        L: Into<String>,
    {
        self.fields.set("x_first_name", first_name);
        self.fields.set("x_last_name", last_name);
        self
    }

    pub fn build(self) -> FieldSet {
        self.fields
    }
}
