//! API documentation.
//!
//! Serves a hand-maintained OpenAPI 3 document for the shop endpoints.

use std::sync::LazyLock;

use axum::Json;
use serde_json::{Value, json};

static OPENAPI: LazyLock<Value> = LazyLock::new(build_document);

/// GET /api-docs/openapi.json
pub async fn openapi() -> Json<Value> {
    Json(OPENAPI.clone())
}

fn envelope(data: &Value) -> Value {
    json!({
        "type": "object",
        "required": ["status", "message", "isSuccess", "data"],
        "properties": {
            "status": { "type": "string", "enum": ["Success", "Failed"] },
            "message": { "type": "string" },
            "isSuccess": { "type": "boolean" },
            "pagination": { "$ref": "#/components/schemas/Pagination" },
            "data": data
        }
    })
}

fn response(description: &str, data: &Value) -> Value {
    json!({
        "description": description,
        "content": { "application/json": { "schema": envelope(data) } }
    })
}

fn failure(description: &str) -> Value {
    response(description, &json!({ "nullable": true }))
}

fn build_document() -> Value {
    let shop = json!({ "$ref": "#/components/schemas/Shop" });
    let id_param = json!({
        "name": "id",
        "in": "path",
        "required": true,
        "schema": { "type": "integer" }
    });
    let query_param = |name: &str, schema: Value, description: &str| {
        json!({
            "name": name,
            "in": "query",
            "required": false,
            "schema": schema,
            "description": description
        })
    };

    json!({
        "openapi": "3.0.3",
        "info": {
            "title": "Shopline API",
            "version": env!("CARGO_PKG_VERSION"),
            "description": "Shops with their products and owners."
        },
        "paths": {
            "/shops": {
                "get": {
                    "summary": "List shops",
                    "parameters": [
                        query_param("shopName", json!({ "type": "string" }), "Case-insensitive substring of the shop name"),
                        query_param("productName", json!({ "type": "string" }), "Case-insensitive substring of a product name"),
                        query_param("stock", json!({ "type": "integer", "minimum": 0 }), "Exact product stock"),
                        query_param("limit", json!({ "type": "integer", "minimum": 1 }), "Page size; all rows when absent"),
                        query_param("page", json!({ "type": "integer", "minimum": 1, "default": 1 }), "Page number")
                    ],
                    "responses": {
                        "200": response("Success get shops data", &json!({
                            "type": "object",
                            "properties": {
                                "shops": {
                                    "type": "array",
                                    "items": { "$ref": "#/components/schemas/ShopListing" }
                                }
                            }
                        })),
                        "400": failure("Invalid query parameter"),
                        "404": failure("Page not found"),
                        "500": failure("An unexpected error occurred")
                    }
                },
                "post": {
                    "summary": "Create a shop",
                    "requestBody": {
                        "required": true,
                        "content": {
                            "application/json": {
                                "schema": { "$ref": "#/components/schemas/CreateShop" }
                            }
                        }
                    },
                    "responses": {
                        "201": response("Success create new Shop", &json!({
                            "type": "object",
                            "properties": { "newShop": shop }
                        })),
                        "400": failure("Validation or database error"),
                        "500": failure("An unexpected error occurred")
                    }
                }
            },
            "/shops/{id}": {
                "get": {
                    "summary": "Get a shop",
                    "parameters": [id_param],
                    "responses": {
                        "200": response("Success get shop data; Shop is null when absent", &json!({
                            "type": "object",
                            "properties": { "Shop": { "allOf": [shop], "nullable": true } }
                        })),
                        "400": failure("Invalid id")
                    }
                },
                "put": {
                    "summary": "Update a shop",
                    "parameters": [id_param],
                    "requestBody": {
                        "required": true,
                        "content": {
                            "application/json": {
                                "schema": { "$ref": "#/components/schemas/UpdateShop" }
                            }
                        }
                    },
                    "responses": {
                        "200": response("Success update shop", &json!({
                            "type": "object",
                            "properties": { "Shop": shop }
                        })),
                        "400": failure("Validation or database error"),
                        "404": failure("Data not found")
                    }
                },
                "delete": {
                    "summary": "Delete a shop and its products",
                    "parameters": [id_param],
                    "responses": {
                        "200": response("Success delete shop", &json!({ "nullable": true })),
                        "404": failure("Data not found")
                    }
                }
            }
        },
        "components": {
            "schemas": {
                "Shop": {
                    "type": "object",
                    "properties": {
                        "id": { "type": "integer" },
                        "name": { "type": "string" },
                        "adminEmail": { "type": "string", "format": "email" },
                        "userId": { "type": "integer" },
                        "createdAt": { "type": "string", "format": "date-time" },
                        "updatedAt": { "type": "string", "format": "date-time" }
                    }
                },
                "ShopListing": {
                    "type": "object",
                    "properties": {
                        "name": { "type": "string" },
                        "adminEmail": { "type": "string", "format": "email" },
                        "products": {
                            "type": "array",
                            "items": {
                                "type": "object",
                                "properties": {
                                    "name": { "type": "string" },
                                    "images": { "type": "array", "items": { "type": "string" } },
                                    "stock": { "type": "integer" },
                                    "price": { "type": "string", "example": "12.50" }
                                }
                            }
                        },
                        "user": {
                            "type": "object",
                            "properties": { "name": { "type": "string" } }
                        }
                    }
                },
                "CreateShop": {
                    "type": "object",
                    "required": ["name", "adminEmail", "userId"],
                    "properties": {
                        "name": { "type": "string", "maxLength": 255 },
                        "adminEmail": { "type": "string", "format": "email" },
                        "userId": { "type": "integer", "minimum": 1 }
                    }
                },
                "UpdateShop": {
                    "type": "object",
                    "properties": {
                        "name": { "type": "string", "maxLength": 255 },
                        "adminEmail": { "type": "string", "format": "email" }
                    }
                },
                "PageDescriptor": {
                    "type": "object",
                    "properties": {
                        "page": { "type": "integer" },
                        "limit": { "type": "integer", "nullable": true }
                    }
                },
                "Pagination": {
                    "type": "object",
                    "properties": {
                        "totalRow": { "type": "integer" },
                        "totalPage": { "type": "integer" },
                        "current": { "$ref": "#/components/schemas/PageDescriptor" },
                        "next": { "$ref": "#/components/schemas/PageDescriptor" },
                        "prev": { "$ref": "#/components/schemas/PageDescriptor" }
                    }
                }
            }
        }
    })
}
