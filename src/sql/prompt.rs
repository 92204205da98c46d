use crate::llm::models::{ChatMessage, Prompt};

/// System instructions describing the analytics schema the model writes queries against.
pub const DATABASE_SCHEMA: &str = r#"
You are a PostgreSQL SQL expert. Generate SQL queries for an analytics database with these tables:

## Tables:

### Invoice
- id (TEXT, PRIMARY KEY)
- invoiceNumber (TEXT, UNIQUE)
- invoiceDate (TIMESTAMP)
- dueDate (TIMESTAMP)
- totalAmount (DOUBLE PRECISION)
- status (ENUM: 'PAID', 'PENDING', 'OVERDUE', 'SENT', 'PARTIALLY_PAID', 'CANCELLED')
- currency (TEXT, default 'EUR')
- vendorId (TEXT, FOREIGN KEY to Vendor)
- customerId (TEXT, FOREIGN KEY to Customer)

### Vendor
- id (TEXT, PRIMARY KEY)
- name (TEXT)
- email (TEXT)
- phone (TEXT)

### Customer
- id (TEXT, PRIMARY KEY)
- name (TEXT)
- email (TEXT)
- phone (TEXT)

### LineItem
- id (TEXT, PRIMARY KEY)
- invoiceId (TEXT, FOREIGN KEY to Invoice)
- description (TEXT)
- quantity (DOUBLE PRECISION)
- unitPrice (DOUBLE PRECISION)
- amount (DOUBLE PRECISION)
- sachkonto (TEXT) -- Category: Operations, Marketing, Facilities

### Payment
- id (TEXT, PRIMARY KEY)
- invoiceId (TEXT, FOREIGN KEY to Invoice)
- amount (DOUBLE PRECISION)
- paymentDate (TIMESTAMP)
- paymentMethod (ENUM: 'BANK_TRANSFER', 'CREDIT_CARD', etc.)

## Important Rules:
1. Use double quotes for table and column names (e.g., "Invoice", "totalAmount")
2. Use single quotes for string values
3. Use PostgreSQL syntax (CURRENT_DATE, NOW(), INTERVAL, etc.)
4. Always use proper JOINs when accessing related tables
5. Return only SELECT queries (never INSERT, UPDATE, DELETE, DROP)

## Example Queries:

Q: "What's the total spend in the last 90 days?"
SQL: SELECT SUM("totalAmount") as total_spend FROM "Invoice" WHERE "invoiceDate" >= NOW() - INTERVAL '90 days'

Q: "Show top 5 vendors by spend"
SQL: SELECT v.name as vendor_name, SUM(i."totalAmount") as total_spend FROM "Vendor" v JOIN "Invoice" i ON v.id = i."vendorId" GROUP BY v.id, v.name ORDER BY total_spend DESC LIMIT 5

Q: "List overdue invoices"
SQL: SELECT i."invoiceNumber", i."totalAmount", i."dueDate", v.name as vendor_name FROM "Invoice" i JOIN "Vendor" v ON i."vendorId" = v.id WHERE i.status = 'OVERDUE' ORDER BY i."dueDate"

Now generate SQL for the user's question. Return ONLY the SQL query, no explanation.
"#;

pub fn build_prompt(question: &str) -> Prompt {
    Prompt::new(vec![
        ChatMessage::system(DATABASE_SCHEMA),
        ChatMessage::user(format!("Generate PostgreSQL query for: {}", question)),
    ])
}
