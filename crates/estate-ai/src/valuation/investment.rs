use tracing::debug;

use super::domain::{InvestmentMetrics, InvestmentRequest, OperatingExpenses};
use super::error::{ensure_amount, ensure_optional_amount, ValuationError};

/// Rule-of-thumb rates applied when the caller omits a figure.
const MONTHLY_RENT_RATE: f64 = 0.008;
const PROPERTY_TAX_RATE: f64 = 0.012;
const INSURANCE_RATE: f64 = 0.005;
const MAINTENANCE_SHARE_OF_RENT: f64 = 0.10;
const DOWN_PAYMENT_RATE: f64 = 0.25;
const CLOSING_COST_RATE: f64 = 0.03;

/// Computes rental yield metrics for a leveraged purchase.
pub fn analyze(request: &InvestmentRequest) -> Result<InvestmentMetrics, ValuationError> {
    validate(request)?;

    let price = request.purchase_price;
    let monthly_rent = request.monthly_rent.unwrap_or(price * MONTHLY_RENT_RATE);
    let annual_rent = monthly_rent * 12.0;

    let property_tax = request
        .annual_property_tax
        .unwrap_or(price * PROPERTY_TAX_RATE);
    let insurance = price * INSURANCE_RATE;
    let maintenance = annual_rent * MAINTENANCE_SHARE_OF_RENT;
    let hoa_fees = request.monthly_hoa_fees.unwrap_or(0.0) * 12.0;
    let total_expenses = property_tax + insurance + maintenance + hoa_fees;

    let net_operating_income = annual_rent - total_expenses;
    let total_investment = price * DOWN_PAYMENT_RATE + price * CLOSING_COST_RATE;
    let cap_rate = annual_rent / price * 100.0;
    let cash_on_cash_return = net_operating_income / total_investment * 100.0;

    debug!(cap_rate, cash_on_cash_return, "investment metrics computed");

    Ok(InvestmentMetrics {
        monthly_rent: cents(monthly_rent),
        annual_rent: cents(annual_rent),
        cap_rate: cents(cap_rate),
        net_operating_income: cents(net_operating_income),
        cash_on_cash_return: cents(cash_on_cash_return),
        total_investment: cents(total_investment),
        expenses: OperatingExpenses {
            property_tax: cents(property_tax),
            insurance: cents(insurance),
            maintenance: cents(maintenance),
            hoa_fees: cents(hoa_fees),
            total: cents(total_expenses),
        },
    })
}

pub(crate) fn validate(request: &InvestmentRequest) -> Result<(), ValuationError> {
    ensure_amount("purchasePrice", request.purchase_price)?;
    if let Some(rent) = request.monthly_rent {
        ensure_amount("monthlyRent", rent)?;
    }
    if let Some(tax) = request.annual_property_tax {
        ensure_optional_amount("annualPropertyTax", tax)?;
    }
    if let Some(fees) = request.monthly_hoa_fees {
        ensure_optional_amount("monthlyHoaFees", fees)?;
    }
    Ok(())
}

pub(crate) fn cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
