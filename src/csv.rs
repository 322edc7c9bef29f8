//! csv input/output format and functions

use csv_async::{AsyncWriterBuilder, Terminator};
use rust_decimal::Decimal;

use crate::{
    account::{self, Account},
    Username,
};
use serde::{Deserialize, Serialize};

use tokio::{
    io::{AsyncRead, AsyncWrite},
    sync::mpsc::Sender,
};
use tokio_stream::{Stream, StreamExt};

// Allowed user actions
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
#[allow(missing_docs)]
pub enum RawActionType {
    Login,
    Transfer,
    Loan,
    Close,
    Sort,
}

/// One form submission as typed by the user. Numbers stay text until the action checks them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[allow(missing_docs)]
pub struct RawAction {
    pub action: RawActionType,
    /// login or close confirmation username
    pub user: Option<String>,
    /// login or close confirmation pin
    pub pin: Option<String>,
    /// transfer receiver username
    pub target: Option<String>,
    /// transfer or loan amount
    pub amount: Option<String>,
}

/// take a reader and continuously deserialize actions from it into `sender`, in file order
pub async fn deserialize_actions_from_csv_reader<'r, R: AsyncRead + Unpin + Send + 'r>(
    input: R,
    sender: Sender<RawAction>,
) -> anyhow::Result<()> {
    let mut builder = csv_async::AsyncReaderBuilder::new();
    builder.trim(csv_async::Trim::All);

    let mut rdr = builder.create_deserializer(input);

    let _headers = rdr.headers().await?;

    let mut records = rdr.deserialize::<RawAction>();
    while let Some(record) = records.next().await {
        let record: RawAction = record?;
        sender.send(record).await?;
    }

    Ok(())
}

/// summary of balance and figures for one account
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[allow(missing_docs)]
pub struct AccountSummary {
    pub owner: String,
    pub username: Username,
    balance: Decimal,
    income: Decimal,
    expense: Decimal,
    interest: Decimal,
}

impl From<&account::ClientAcc> for AccountSummary {
    fn from(oth: &account::ClientAcc) -> Self {
        let rp = 2; // round precision
        Self {
            owner: oth.owner().to_owned(),
            username: oth.username().to_owned(),
            balance: oth.balance().round_dp(rp).normalize(),
            income: oth.income().round_dp(rp).normalize(),
            expense: oth.expense().round_dp(rp).normalize(),
            interest: oth.interest().round_dp(rp).normalize(),
        }
    }
}

/// read accounts from `in_stream` and save them as [`AccountSummary`] into `wr`. Headers will
/// be included automatically. Terminator is `\r\n`.
pub async fn summarize_accounts<'a>(
    in_stream: impl Stream<Item = &'a account::ClientAcc> + Unpin,
    wr: impl AsyncWrite + Unpin,
) -> anyhow::Result<()> {
    let mut in_stream = in_stream;

    let mut builder = AsyncWriterBuilder::new();
    builder.terminator(Terminator::CRLF);

    let mut wr = builder.create_serializer(wr);

    while let Some(acc) = in_stream.next().await {
        let acc_summary = AccountSummary::from(acc);
        wr.serialize(acc_summary).await?;
    }

    wr.flush().await?;
    Ok(())
}
